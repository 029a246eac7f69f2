//! Application state

use sqlx::SqlitePool;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
