//! Server configuration

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port (env: PORT)
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}
