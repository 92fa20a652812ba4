//! Optional tunables loaded from `settings.toml`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub login: LoginSection,
    #[serde(default)]
    pub setup: SetupSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// Enforce a UNIQUE constraint on `network` in addition to the surrogate id.
    #[serde(default = "default_true")]
    pub unique_networks: bool,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            unique_networks: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSection {
    /// Owner check attempts allowed per launch.
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,
}

impl Default for LoginSection {
    fn default() -> Self {
        Self {
            max_attempts: default_attempts(),
        }
    }
}

impl LoginSection {
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupSection {
    /// Echo the chosen name and secret once after setup.
    #[serde(default)]
    pub echo_credentials: bool,
}

fn default_true() -> bool {
    true
}

fn default_attempts() -> u32 {
    1
}
