//! restaurant-server — Restaurant ordering API backed by SQLite
//!
//! Manages the menu (dishes and categories) and customer orders. An
//! order snapshots each dish's price at the moment it is placed, so
//! later menu edits never change what was billed. Order writes touch
//! two tables and run inside a transaction.

pub mod api;
pub mod config;
pub mod db;
pub mod state;

pub use config::Config;
pub use state::AppState;
