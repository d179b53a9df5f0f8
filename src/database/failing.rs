use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::memory::MemoryStore;
use super::models::{Post, Profile, User};
use super::store::{DocumentStore, StoreError};

/// Reads from a shared memory store; every write fails as if the connection dropped
pub(crate) struct FailingWrites {
    inner: Arc<MemoryStore>,
}

impl FailingWrites {
    pub(crate) fn new(inner: Arc<MemoryStore>) -> Self {
        Self { inner }
    }
}

fn lost() -> StoreError {
    StoreError::ConnectionError("connection reset".to_string())
}

#[async_trait]
impl DocumentStore for FailingWrites {
    async fn load_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.inner.load_user(id).await
    }

    async fn load_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.inner.load_user_by_email(email).await
    }

    async fn save_user(&self, _user: &User) -> Result<(), StoreError> {
        Err(lost())
    }

    async fn delete_user(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(lost())
    }

    async fn load_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        self.inner.load_post(id).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.inner.list_posts().await
    }

    async fn save_post(&self, _post: &Post) -> Result<(), StoreError> {
        Err(lost())
    }

    async fn delete_post(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(lost())
    }

    async fn delete_posts_by_owner(&self, _owner: Uuid) -> Result<u64, StoreError> {
        Err(lost())
    }

    async fn load_profile(&self, owner: Uuid) -> Result<Option<Profile>, StoreError> {
        self.inner.load_profile(owner).await
    }

    async fn load_profile_by_id(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        self.inner.load_profile_by_id(id).await
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        self.inner.list_profiles().await
    }

    async fn save_profile(&self, _profile: &Profile) -> Result<(), StoreError> {
        Err(lost())
    }

    async fn delete_profile(&self, _owner: Uuid) -> Result<bool, StoreError> {
        Err(lost())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(lost())
    }

    async fn close(&self) {}
}
