//! Application state for the Member Import Engine API.

use std::sync::Arc;

use crate::config::ImportConfig;
use crate::store::MemberStore;

/// Shared application state.
///
/// Contains resources shared across all request handlers: the persistence
/// collaborator and the import configuration.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn MemberStore>,
    config: Arc<ImportConfig>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: Arc<dyn MemberStore>, config: ImportConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Returns the member store.
    pub fn store(&self) -> &Arc<dyn MemberStore> {
        &self.store
    }

    /// Returns the import configuration.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }
}
