use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Post, Profile, User};

/// Errors from the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// Whether the failure is about reaching the store rather than a bad request
    pub fn is_connectivity(&self) -> bool {
        match self {
            StoreError::ConnectionError(_) => true,
            StoreError::Sqlx(err) => matches!(
                err,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

/// Load/save contract for parent documents.
///
/// Every save writes the whole document, nested collections included, in one
/// call. Loads hand out an owned copy; nothing a caller does to it is visible
/// to other requests until it is saved.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn load_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Fails with [`StoreError::Conflict`] when another user already has the email
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn load_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    /// All posts, most recent first
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;
    async fn save_post(&self, post: &Post) -> Result<(), StoreError>;
    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn delete_posts_by_owner(&self, owner: Uuid) -> Result<u64, StoreError>;

    async fn load_profile(&self, owner: Uuid) -> Result<Option<Profile>, StoreError>;
    async fn load_profile_by_id(&self, id: Uuid) -> Result<Option<Profile>, StoreError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;
    /// Fails with [`StoreError::Conflict`] when a different profile exists for the owner
    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError>;
    async fn delete_profile(&self, owner: Uuid) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
    async fn close(&self);
}
