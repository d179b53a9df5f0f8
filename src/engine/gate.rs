//! Ownership gate: decides whether a caller may perform a mutation.
//!
//! Every decision is re-derived from the owner recorded on the parent or the
//! element at the time of the request. Existence must be established by the
//! caller before asking; the gate only ever answers allow or deny.

use tracing::warn;
use uuid::Uuid;

use super::error::CoreError;
use crate::database::models::{Comment, Post, Profile};

/// Mutations and reads that can be requested against a post
#[derive(Debug, Clone, Copy)]
pub enum PostAction<'a> {
    Read,
    Delete,
    Like,
    Unlike,
    AddComment,
    RemoveComment(&'a Comment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    fn from_bool(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }

    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }

    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(CoreError::Unauthorized),
        }
    }
}

pub fn authorize(caller: Uuid, post: &Post, action: PostAction<'_>) -> Decision {
    let decision = match action {
        PostAction::Read | PostAction::Like | PostAction::Unlike | PostAction::AddComment => Decision::Allow,
        PostAction::Delete => Decision::from_bool(post.owner == caller),
        // Only the comment's author; owning the post grants nothing here
        PostAction::RemoveComment(comment) => Decision::from_bool(comment.user_id == caller),
    };

    if !decision.is_allowed() {
        warn!("Denied {} on post {} for caller {}", action_name(action), post.id, caller);
    }
    decision
}

/// Profiles are only ever loaded by the caller's own id; this re-checks the
/// loaded document actually belongs to them before any section mutation.
pub fn authorize_profile(caller: Uuid, profile: &Profile) -> Decision {
    let decision = Decision::from_bool(profile.owner == caller);
    if !decision.is_allowed() {
        warn!("Denied profile mutation on {} for caller {}", profile.id, caller);
    }
    decision
}

fn action_name(action: PostAction<'_>) -> &'static str {
    match action {
        PostAction::Read => "read",
        PostAction::Delete => "delete",
        PostAction::Like => "like",
        PostAction::Unlike => "unlike",
        PostAction::AddComment => "add comment",
        PostAction::RemoveComment(_) => "remove comment",
    }
}
