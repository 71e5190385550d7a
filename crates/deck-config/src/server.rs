//! HTTP server configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the API server binds to.
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl ServerConfig {
    /// Parse the configured listen address into a socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `listen` is not a valid
    /// `host:port` pair.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen.parse().map_err(|e| ConfigError::InvalidValue {
            field: "server.listen".to_string(),
            reason: format!("'{}' is not a socket address: {e}", self.listen),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}
