use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::engine::CoreError;

/// Collects per-field errors while pulling required values out of a request body
#[derive(Debug, Default)]
pub struct Validator {
    field_errors: HashMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A non-blank string, trimmed
    pub fn required(&mut self, field: &str, value: Option<String>, message: &str) -> Option<String> {
        match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(v) => Some(v),
            None => {
                self.reject(field, message);
                None
            }
        }
    }

    pub fn required_value<T>(&mut self, field: &str, value: Option<T>, message: &str) -> Option<T> {
        if value.is_none() {
            self.reject(field, message);
        }
        value
    }

    pub fn min_len(&mut self, field: &str, value: Option<String>, min: usize, message: &str) -> Option<String> {
        match value {
            Some(v) if v.chars().count() >= min => Some(v),
            _ => {
                self.reject(field, message);
                None
            }
        }
    }

    /// A calendar date, required and well formed
    pub fn required_date(&mut self, field: &str, value: Option<String>, message: &str) -> Option<NaiveDate> {
        match blank_to_none(value) {
            Some(raw) => self.date(field, &raw),
            None => {
                self.reject(field, message);
                None
            }
        }
    }

    /// A calendar date that may be left out; blank counts as absent
    pub fn optional_date(&mut self, field: &str, value: Option<String>) -> Option<NaiveDate> {
        blank_to_none(value).and_then(|raw| self.date(field, &raw))
    }

    fn date(&mut self, field: &str, raw: &str) -> Option<NaiveDate> {
        let parsed = parse_date(raw);
        if parsed.is_none() {
            self.reject(field, "Invalid date");
        }
        parsed
    }

    /// Minimal shape check: something@something.tld
    pub fn email(&mut self, field: &str, value: Option<String>, message: &str) -> Option<String> {
        let value = value.map(|v| v.trim().to_lowercase());
        let valid = value.as_deref().is_some_and(|v| {
            v.split_once('@').is_some_and(|(local, domain)| {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
            })
        });
        if valid {
            value
        } else {
            self.reject(field, message);
            None
        }
    }

    fn reject(&mut self, field: &str, message: &str) {
        self.field_errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn into_error(self) -> CoreError {
        CoreError::ValidationFailed {
            message: "Validation failed".to_string(),
            field_errors: self.field_errors,
        }
    }

    pub fn finish(self) -> Result<(), CoreError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// `YYYY-MM-DD`, or the UTC date of an RFC 3339 timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc).date_naive()))
}
