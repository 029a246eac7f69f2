//! Application state

use crate::store::TaskStore;

/// Shared application state, cloned into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: TaskStore,
}

impl AppState {
    /// State with the sample tasks loaded
    pub fn new() -> Self {
        Self {
            store: TaskStore::seeded(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
