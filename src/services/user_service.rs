use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::database::models::User;
use crate::database::{DocumentStore, StoreError};
use crate::engine::{CoreError, CoreResult, Resource};

/// Gravatar URL for an email, hashed with SHA-256 over the normalized address
pub fn avatar_url(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    let hash = hasher.finalize();
    format!("https://www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm", hash)
}

/// Account registration, login and lookup
pub struct UserService {
    store: Arc<dyn DocumentStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create an account. `email` is expected to be normalized already.
    pub async fn register(&self, name: String, email: String, password: &str) -> CoreResult<User> {
        if self.store.load_user_by_email(&email).await?.is_some() {
            return Err(CoreError::validation("email", "User already exists"));
        }

        let user = User {
            id: Uuid::new_v4(),
            avatar: avatar_url(&email),
            name,
            email,
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };

        match self.store.save_user(&user).await {
            Ok(()) => {}
            // Lost a race with a concurrent registration for the same email
            Err(StoreError::Conflict(_)) => {
                return Err(CoreError::validation("email", "User already exists"));
            }
            Err(e) => return Err(e.into()),
        }

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<User> {
        let user = self
            .store
            .load_user_by_email(email)
            .await?
            .ok_or_else(|| CoreError::rejected("Invalid credentials"))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(CoreError::rejected("Invalid credentials"));
        }

        info!("User {} logged in", user.id);
        Ok(user)
    }

    pub async fn current_user(&self, caller: Uuid) -> CoreResult<User> {
        self.store
            .load_user(caller)
            .await?
            .ok_or(CoreError::NotFound(Resource::User))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn avatar_ignores_case_and_whitespace() {
        assert_eq!(avatar_url(" Ada@Example.com "), avatar_url("ada@example.com"));
        assert!(avatar_url("ada@example.com").starts_with("https://www.gravatar.com/avatar/"));
    }

    #[tokio::test]
    async fn register_then_login() {
        let users = service();
        let user = users
            .register("Ada".into(), "ada@example.com".into(), "secret1")
            .await
            .unwrap();
        assert_ne!(user.password_hash, "secret1");

        let logged_in = users.login("ada@example.com", "secret1").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let users = service();
        users.register("Ada".into(), "ada@example.com".into(), "secret1").await.unwrap();

        let err = users
            .register("Other".into(), "ada@example.com".into(), "secret2")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let users = service();
        users.register("Ada".into(), "ada@example.com".into(), "secret1").await.unwrap();

        let wrong = users.login("ada@example.com", "nope").await.unwrap_err();
        let unknown = users.login("bob@example.com", "secret1").await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
    }
}
