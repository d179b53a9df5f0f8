use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

use super::collection;
use super::error::CoreError;
use crate::database::models::{Education, Experience, Profile};
use crate::validation::Validator;

/// Split a comma-delimited skill list, trimming each entry.
/// Order is kept. Duplicates and empty entries are kept as submitted.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Raw profile fields as submitted by a client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "gitHubUsername", alias = "githubusername")]
    pub github_username: Option<String>,
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// Partial profile update: `Some` overwrites, `None` preserves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub github_username: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social_links: BTreeMap<String, String>,
}

/// Blank strings count as absent
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<ProfileInput> for ProfileUpdate {
    fn from(input: ProfileInput) -> Self {
        let mut social_links = BTreeMap::new();
        let platforms = [
            ("youtube", input.youtube),
            ("twitter", input.twitter),
            ("facebook", input.facebook),
            ("linkedin", input.linkedin),
            ("instagram", input.instagram),
        ];
        for (platform, url) in platforms {
            if let Some(url) = present(url) {
                social_links.insert(platform.to_string(), url);
            }
        }

        Self {
            company: present(input.company),
            website: present(input.website),
            location: present(input.location),
            bio: present(input.bio),
            status: present(input.status),
            github_username: present(input.github_username),
            skills: present(input.skills).map(|raw| parse_skills(&raw)),
            social_links,
        }
    }
}

impl ProfileInput {
    /// Check the fields every profile submission must carry, then convert
    pub fn into_update(self) -> Result<ProfileUpdate, CoreError> {
        let mut v = Validator::new();
        v.required("status", self.status.clone(), "Status is required");
        v.required("skills", self.skills.clone(), "Skills is required");
        v.finish()?;
        Ok(self.into())
    }
}

impl ProfileUpdate {
    /// Merge into an existing profile. Identifier, owner and both sections
    /// are never touched.
    pub fn apply_to(self, profile: &mut Profile) {
        fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        merge(&mut profile.company, self.company);
        merge(&mut profile.website, self.website);
        merge(&mut profile.location, self.location);
        merge(&mut profile.bio, self.bio);
        merge(&mut profile.status, self.status);
        merge(&mut profile.github_username, self.github_username);
        if let Some(skills) = self.skills {
            profile.skills = skills;
        }
        profile.social_links.extend(self.social_links);
    }

    pub fn into_new_profile(self, owner: Uuid) -> Profile {
        let mut profile = Profile::empty(owner);
        self.apply_to(&mut profile);
        profile
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Experience,
    Education,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceInput {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default, alias = "current")]
    pub is_current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationInput {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default, alias = "current")]
    pub is_current: bool,
    pub description: Option<String>,
}

impl ExperienceInput {
    pub fn into_entry(self) -> Result<SectionEntry, CoreError> {
        let mut v = Validator::new();
        let title = v.required("title", self.title, "Title is required");
        let company = v.required("company", self.company, "Company is required");
        let from = v.required_date("from", self.from, "From date is required");
        let to = v.optional_date("to", self.to);

        match (title, company, from) {
            (Some(title), Some(company), Some(from)) if v.is_valid() => Ok(SectionEntry::Experience(Experience {
                id: Uuid::new_v4(),
                title,
                company,
                location: present(self.location),
                from,
                to,
                is_current: self.is_current,
                description: present(self.description),
            })),
            _ => Err(v.into_error()),
        }
    }
}

impl EducationInput {
    pub fn into_entry(self) -> Result<SectionEntry, CoreError> {
        let mut v = Validator::new();
        let school = v.required("school", self.school, "School is required");
        let degree = v.required("degree", self.degree, "Degree is required");
        let field_of_study = v.required("fieldOfStudy", self.field_of_study, "Field of study is required");
        let from = v.required_date("from", self.from, "From date is required");
        let to = v.optional_date("to", self.to);

        match (school, degree, field_of_study, from) {
            (Some(school), Some(degree), Some(field_of_study), Some(from)) if v.is_valid() => {
                Ok(SectionEntry::Education(Education {
                    id: Uuid::new_v4(),
                    school,
                    degree,
                    field_of_study,
                    from,
                    to,
                    is_current: self.is_current,
                    description: present(self.description),
                }))
            }
            _ => Err(v.into_error()),
        }
    }
}

/// A validated entry ready to be inserted at the head of a section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionEntry {
    Experience(Experience),
    Education(Education),
}

impl SectionEntry {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionEntry::Experience(_) => SectionKind::Experience,
            SectionEntry::Education(_) => SectionKind::Education,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            SectionEntry::Experience(e) => e.id,
            SectionEntry::Education(e) => e.id,
        }
    }
}

/// Insert the entry at the head of its section
pub fn add_entry(profile: Profile, entry: SectionEntry) -> Profile {
    match entry {
        SectionEntry::Experience(e) => collection::insert_head(profile, |p| &mut p.experiences, e),
        SectionEntry::Education(e) => collection::insert_head(profile, |p| &mut p.education, e),
    }
}

/// Remove the entry with `entry_id` from the named section; `None` if absent
pub fn remove_entry(profile: Profile, kind: SectionKind, entry_id: Uuid) -> Option<Profile> {
    match kind {
        SectionKind::Experience => collection::remove_by_element_id(profile, |p| &mut p.experiences, entry_id),
        SectionKind::Education => collection::remove_by_element_id(profile, |p| &mut p.education, entry_id),
    }
}
