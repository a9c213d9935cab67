//! HTTP Server Configuration
//!
//! Host, port, and CORS settings for the HTTP server.

use crate::config::{optional, parse_var, ConfigResult};

pub const APP_HOST: &str = "APP_HOST";
pub const APP_PORT: &str = "APP_PORT";
pub const APP_CORS_ORIGINS: &str = "APP_CORS_ORIGINS";

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 10301)
    pub port: u16,

    /// CORS allowed origins (default: empty, meaning any origin)
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10301,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Read `APP_HOST`, `APP_PORT` and `APP_CORS_ORIGINS`; all optional.
    pub fn from_lookup<F>(lookup: &F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = optional(lookup, APP_HOST) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = optional(lookup, APP_PORT) {
            config.port = parse_var(APP_PORT, &port)?;
        }
        if let Some(origins) = optional(lookup, APP_CORS_ORIGINS) {
            config.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(config)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
