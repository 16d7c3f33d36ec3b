//! Network configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tunables for a `SocialNetwork`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Maximum number of undo checkpoints kept.
    pub history_depth: usize,
    /// Emit `InterestRecorded` events when users enter the graph iteratively.
    pub record_interests: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            history_depth: 16,
            record_interests: true,
        }
    }
}

impl NetworkConfig {
    /// Parse and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_depth == 0 {
            return Err(Error::Config("history_depth must be at least 1".into()));
        }
        Ok(())
    }
}
