//! Shared application state.

use std::sync::Arc;

use movies_core::store::DocumentStore;

use crate::config::Config;

/// Cloned into every handler.
///
/// The store handle is built once at startup and is read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// State backed by an empty in-memory store.
    #[cfg(test)]
    pub fn in_memory(config: Config) -> Self {
        Self::new(Arc::new(crate::storage::MemoryStore::new()), config)
    }
}
