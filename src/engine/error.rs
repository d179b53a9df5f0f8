use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::database::StoreError;

/// Kinds of resources the core can fail to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Post,
    Comment,
    Profile,
    Experience,
    Education,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::User => "User",
            Resource::Post => "Post",
            Resource::Comment => "Comment",
            Resource::Profile => "Profile",
            Resource::Experience => "Experience",
            Resource::Education => "Education",
        };
        f.write_str(name)
    }
}

/// Errors returned by every core operation.
///
/// Checks run in a fixed order: existence, then authorization, then the
/// like-state checks.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No valid caller identity")]
    Unauthenticated,

    #[error("User not authorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(Resource),

    #[error("Post already liked")]
    AlreadyLiked,

    #[error("Post has not yet been liked")]
    NotYetLiked,

    #[error("{message}")]
    ValidationFailed {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl CoreError {
    /// Rejected input with a message but no single offending field
    pub fn rejected(message: impl Into<String>) -> Self {
        CoreError::ValidationFailed {
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(field.into(), reason.into());
        CoreError::ValidationFailed {
            message: "Validation failed".to_string(),
            field_errors,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
