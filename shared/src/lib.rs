//! Shared types for the task and restaurant services
//!
//! Response envelope, application error type, and small helpers used by
//! every HTTP service in this workspace.

pub mod error;
pub mod extract;
pub mod response;
pub mod util;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResult};
pub use response::ApiResponse;
