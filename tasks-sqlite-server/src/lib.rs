//! tasks-sqlite-server — Task API backed by SQLite
//!
//! Persistent successor to `tasks-memory-server`: same task domain, but
//! rows live in a SQLite file managed through a `sqlx` pool, responses
//! use the `{success, mensaje, datos}` envelope, and unknown routes get
//! a JSON 404.

pub mod api;
pub mod config;
pub mod db;
pub mod state;

pub use config::Config;
pub use state::AppState;
