//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `TOPIC_PAYMENT_PROCESS` — topic for `order_created` events
/// - `TOPIC_PAYMENT_COMPLETION` — topic for completion events
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub payment_topic: String,
    pub completion_topic: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            payment_topic: std::env::var("TOPIC_PAYMENT_PROCESS")
                .unwrap_or_else(|_| saga::TOPIC_PAYMENT_PROCESS.to_string()),
            completion_topic: std::env::var("TOPIC_PAYMENT_COMPLETION")
                .unwrap_or_else(|_| saga::TOPIC_PAYMENT_COMPLETION.to_string()),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            payment_topic: saga::TOPIC_PAYMENT_PROCESS.to_string(),
            completion_topic: saga::TOPIC_PAYMENT_COMPLETION.to_string(),
        }
    }
}
