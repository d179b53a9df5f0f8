use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{Post, Profile, User};
use super::store::{DocumentStore, StoreError};
use crate::config::DatabaseConfig;

/// Document tables: one JSONB document per row, with the lookup keys
/// duplicated into plain columns for indexing.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        doc JSONB NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS posts (
        id UUID PRIMARY KEY,
        owner UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        doc JSONB NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS posts_owner_idx ON posts (owner)",
    "CREATE TABLE IF NOT EXISTS profiles (
        id UUID PRIMARY KEY,
        owner UUID NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL,
        doc JSONB NOT NULL
    )",
];

const LIST_PROFILES: &str = "SELECT doc FROM profiles ORDER BY created_at ASC, id ASC";

/// PostgreSQL-backed document store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect using `DATABASE_URL` and the pool settings from config
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        info!("Connected document store to PostgreSQL");
        Ok(store)
    }

    /// Create the document tables if they do not exist yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

/// Unique-key violations surface as conflicts so callers can tell them apart
fn map_write_error(err: sqlx::Error, what: String) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(what),
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn load_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, (Json<User>,)>("SELECT doc FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(user),)| user))
    }

    async fn load_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, (Json<User>,)>("SELECT doc FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(user),)| user))
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, email, doc) VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, doc = EXCLUDED.doc",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(Json(user))
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, format!("email {}", user.email)))?;
        debug!("Saved user {}", user.id);
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn load_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, (Json<Post>,)>("SELECT doc FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(post),)| post))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, (Json<Post>,)>("SELECT doc FROM posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(Json(post),)| post).collect())
    }

    async fn save_post(&self, post: &Post) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO posts (id, owner, created_at, doc) VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
        )
        .bind(post.id)
        .bind(post.owner)
        .bind(post.created_at)
        .bind(Json(post))
        .execute(&self.pool)
        .await?;
        debug!("Saved post {} ({} likes, {} comments)", post.id, post.likes.len(), post.comments.len());
        Ok(())
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_posts_by_owner(&self, owner: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE owner = $1")
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn load_profile(&self, owner: Uuid) -> Result<Option<Profile>, StoreError> {
        let row = sqlx::query_as::<_, (Json<Profile>,)>("SELECT doc FROM profiles WHERE owner = $1")
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(profile),)| profile))
    }

    async fn load_profile_by_id(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        let row = sqlx::query_as::<_, (Json<Profile>,)>("SELECT doc FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(Json(profile),)| profile))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let rows = sqlx::query_as::<_, (Json<Profile>,)>(LIST_PROFILES)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(Json(profile),)| profile).collect())
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO profiles (id, owner, created_at, doc) VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
        )
        .bind(profile.id)
        .bind(profile.owner)
        .bind(profile.created_at)
        .bind(Json(profile))
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, format!("profile for owner {}", profile.owner)))?;
        debug!("Saved profile {} for owner {}", profile.id, profile.owner);
        Ok(())
    }

    async fn delete_profile(&self, owner: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE owner = $1")
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
