//! Application state shared across handlers.

use std::sync::Arc;

use kuzka_persistence::LeadStore;

use crate::config::ApiConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Lead files under `<data_dir>/leads`.
    pub store: Arc<LeadStore>,
}

impl AppState {
    /// Creates the state, opening the lead store in `config.data_dir`.
    pub fn new(config: ApiConfig) -> Self {
        let store = LeadStore::new(&config.data_dir);
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}
