//! Database configuration.

use serde::{Deserialize, Serialize};

/// Default database path, relative to the working directory.
fn default_path() -> String {
    "taskdeck.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file. `":memory:"` is accepted for tests.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
