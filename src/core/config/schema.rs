//! core::config::schema
//!
//! Configuration file schema.
//!
//! Every key is optional; unset keys fall back to the defaults exposed by
//! [`super::Config`]'s accessors.
//!
//! # Example
//!
//! ```toml
//! history_limit = 100
//! palette = ["#58a6ff", "#a371f7"]
//! commit_messages = ["Add feature", "Fix bug"]
//! default_stash_message = "WIP"
//! state_file = "/tmp/gitsim.json"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Simulator configuration as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Number of snapshots kept for undo
    pub history_limit: Option<usize>,

    /// Branch colour cycle
    pub palette: Option<Vec<String>>,

    /// Pool for commits created without a message
    pub commit_messages: Option<Vec<String>>,

    /// Message for stash entries saved without one
    pub default_stash_message: Option<String>,

    /// Where the shell saves and restores state
    pub state_file: Option<PathBuf>,
}

impl SimConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == Some(0) {
            return Err(ConfigError::InvalidValue(
                "history_limit must be at least 1".to_string(),
            ));
        }

        if let Some(palette) = &self.palette {
            if palette.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "palette cannot be empty".to_string(),
                ));
            }
        }

        if let Some(messages) = &self.commit_messages {
            if messages.is_empty() || messages.iter().any(|m| m.trim().is_empty()) {
                return Err(ConfigError::InvalidValue(
                    "commit_messages must be a non-empty list of non-blank messages".to_string(),
                ));
            }
        }

        if let Some(message) = &self.default_stash_message {
            if message.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "default_stash_message cannot be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}
