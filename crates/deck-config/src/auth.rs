//! Shared-secret authorization configuration.

use serde::{Deserialize, Serialize};

/// Team secret used when none is configured. The lower-privilege path stays
/// usable out of the box so a fresh install can accept pushes from the team.
pub const DEFAULT_TEAM_SECRET: &str = "deck-team-secret";

fn default_team_secret() -> String {
    DEFAULT_TEAM_SECRET.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Privileged manager secret. Empty means the manager path is disabled;
    /// there is no built-in default for it.
    #[serde(default)]
    pub manager_secret: String,

    /// Lower-privilege team secret, defaulted if unconfigured.
    #[serde(default = "default_team_secret")]
    pub team_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            manager_secret: String::new(),
            team_secret: default_team_secret(),
        }
    }
}

impl AuthConfig {
    /// Whether a manager secret has been configured.
    #[must_use]
    pub fn has_manager_secret(&self) -> bool {
        !self.manager_secret.is_empty()
    }
}
