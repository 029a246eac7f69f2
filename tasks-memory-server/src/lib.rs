//! tasks-memory-server — Task API backed by an in-memory store
//!
//! The first iteration of the task service. Tasks live in a shared
//! `Vec` behind an async lock and disappear on restart; the SQLite
//! variant in `tasks-sqlite-server` is the persistent successor.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod state;
pub mod store;

pub use config::Config;
pub use state::AppState;
