use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::models::{Post, Profile, User};
use super::store::{DocumentStore, StoreError};

#[derive(Default)]
struct Documents {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    profiles: HashMap<Uuid, Profile>,
}

/// Process-local document store used for development and tests
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.docs.read().await.users.get(&id).cloned())
    }

    async fn load_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.users.values().find(|u| u.email == email).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        if docs
            .users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(StoreError::Conflict(format!("email {}", user.email)));
        }
        docs.users.insert(user.id, user.clone());
        debug!("Saved user {}", user.id);
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.docs.write().await.users.remove(&id).is_some())
    }

    async fn load_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.docs.read().await.posts.get(&id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let docs = self.docs.read().await;
        let mut posts: Vec<Post> = docs.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn save_post(&self, post: &Post) -> Result<(), StoreError> {
        self.docs.write().await.posts.insert(post.id, post.clone());
        debug!("Saved post {} ({} likes, {} comments)", post.id, post.likes.len(), post.comments.len());
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.docs.write().await.posts.remove(&id).is_some())
    }

    async fn delete_posts_by_owner(&self, owner: Uuid) -> Result<u64, StoreError> {
        let mut docs = self.docs.write().await;
        let before = docs.posts.len();
        docs.posts.retain(|_, p| p.owner != owner);
        Ok((before - docs.posts.len()) as u64)
    }

    async fn load_profile(&self, owner: Uuid) -> Result<Option<Profile>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.profiles.values().find(|p| p.owner == owner).cloned())
    }

    async fn load_profile_by_id(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.docs.read().await.profiles.get(&id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let docs = self.docs.read().await;
        let mut profiles: Vec<Profile> = docs.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(profiles)
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        if docs
            .profiles
            .values()
            .any(|p| p.owner == profile.owner && p.id != profile.id)
        {
            return Err(StoreError::Conflict(format!("profile for owner {}", profile.owner)));
        }
        docs.profiles.insert(profile.id, profile.clone());
        debug!("Saved profile {} for owner {}", profile.id, profile.owner);
        Ok(())
    }

    async fn delete_profile(&self, owner: Uuid) -> Result<bool, StoreError> {
        let mut docs = self.docs.write().await;
        let before = docs.profiles.len();
        docs.profiles.retain(|_, p| p.owner != owner);
        Ok(docs.profiles.len() < before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: email.to_string(),
            avatar: String::new(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn loads_are_independent_copies() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let post = Post::new(owner, "hello".into(), "A".into(), String::new());
        store.save_post(&post).await.unwrap();

        let mut copy = store.load_post(post.id).await.unwrap().unwrap();
        copy.text = "changed".into();

        let stored = store.load_post(post.id).await.unwrap().unwrap();
        assert_eq!(stored.text, "hello");
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.save_user(&user("a@example.com")).await.unwrap();

        let err = store.save_user(&user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn rejects_second_profile_for_owner() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        store.save_profile(&Profile::empty(owner)).await.unwrap();

        let err = store.save_profile(&Profile::empty(owner)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn deletes_only_the_owners_posts() {
        let store = MemoryStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.save_post(&Post::new(a, "1".into(), "A".into(), String::new())).await.unwrap();
        store.save_post(&Post::new(a, "2".into(), "A".into(), String::new())).await.unwrap();
        store.save_post(&Post::new(b, "3".into(), "B".into(), String::new())).await.unwrap();

        assert_eq!(store.delete_posts_by_owner(a).await.unwrap(), 2);
        let remaining = store.list_posts().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].owner, b);
    }

    #[tokio::test]
    async fn profile_lookups_by_owner_and_id_agree() {
        let store = MemoryStore::new();
        let profile = Profile::empty(Uuid::new_v4());
        store.save_profile(&profile).await.unwrap();

        let by_owner = store.load_profile(profile.owner).await.unwrap();
        let by_id = store.load_profile_by_id(profile.id).await.unwrap();
        assert_eq!(by_owner, Some(profile.clone()));
        assert_eq!(by_id, Some(profile));
        assert!(store.load_profile_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }
}
