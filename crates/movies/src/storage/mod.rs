//! Storage backend implementations.
//!
//! Both backends implement `DocumentStore` from `movies_core::store`. The
//! backend is selected at startup with `--store` (or `STORE_BACKEND`).

pub mod dynamodb;
pub mod inmemory;

use std::sync::Arc;

use movies_core::store::DocumentStore;

use crate::config::{StoreBackend, StoreConfig};

pub use dynamodb::DynamoDbStore;
pub use inmemory::MemoryStore;

/// Build the configured store backend.
pub async fn build_store(backend: StoreBackend, config: &StoreConfig) -> Arc<dyn DocumentStore> {
    match backend {
        StoreBackend::DynamoDb => {
            tracing::info!(
                region = %config.region,
                endpoint = %config.endpoint_url,
                "Using DynamoDB store"
            );
            Arc::new(DynamoDbStore::from_config(config).await)
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Arc::new(MemoryStore::new())
        }
    }
}
