#[cfg(test)]
pub(crate) mod failing;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use std::sync::Arc;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{DocumentStore, StoreError};

use crate::config::{DatabaseConfig, StoreBackend};

/// Open the configured store. Called once before the server accepts requests;
/// the returned handle is threaded through application state.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => Ok(Arc::new(PgStore::connect(config).await?)),
    }
}
