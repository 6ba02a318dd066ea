//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, first hit wins:
//! 1. `$GITSIM_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitsim/config.toml`
//! 3. `~/.gitsim/config.toml`
//!
//! A missing file is not an error; defaults apply.
//!
//! # Example
//!
//! ```no_run
//! use gitsim::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("History limit: {}", config.history_limit());
//! println!("Palette size: {}", config.palette().len());
//! ```

pub mod schema;

pub use schema::SimConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default number of snapshots kept for undo.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Default branch colour cycle.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#58a6ff", "#a371f7", "#3fb950", "#f78166", "#d29922", "#db61a2", "#79c0ff", "#7ee787",
];

/// Default pool of random commit messages.
pub const DEFAULT_COMMIT_MESSAGES: [&str; 15] = [
    "Initial commit",
    "Add feature implementation",
    "Fix bug in authentication",
    "Update dependencies",
    "Refactor database queries",
    "Add unit tests",
    "Improve error handling",
    "Update documentation",
    "Optimize performance",
    "Add input validation",
    "Fix memory leak",
    "Update API endpoints",
    "Add caching layer",
    "Fix CSS styling issues",
    "Add logging functionality",
];

/// Default message for stash entries.
pub const DEFAULT_STASH_MESSAGE: &str = "WIP: work in progress";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone)]
pub struct Config {
    file: SimConfig,
    path: Option<PathBuf>,
    palette: Vec<String>,
    commit_messages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_schema(SimConfig::default(), None)
    }
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file: SimConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(Self::from_schema(file, Some(path.to_path_buf())))
    }

    /// Build a config from an in-memory schema value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if validation fails.
    pub fn from_file(file: SimConfig) -> Result<Self, ConfigError> {
        file.validate()?;
        Ok(Self::from_schema(file, None))
    }

    fn from_schema(file: SimConfig, path: Option<PathBuf>) -> Self {
        let palette = file
            .palette
            .clone()
            .unwrap_or_else(|| DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect());
        let commit_messages = file
            .commit_messages
            .clone()
            .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGES.iter().map(|s| s.to_string()).collect());
        Self {
            file,
            path,
            palette,
            commit_messages,
        }
    }

    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("GITSIM_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitsim/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".gitsim/config.toml"))
            .filter(|path| path.exists())
    }

    /// Path of the file this config was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of snapshots kept for undo.
    pub fn history_limit(&self) -> usize {
        self.file.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Branch colour cycle. Never empty.
    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Random commit message pool. Never empty.
    pub fn commit_messages(&self) -> &[String] {
        &self.commit_messages
    }

    /// Message for stash entries saved without one.
    pub fn default_stash_message(&self) -> &str {
        self.file
            .default_stash_message
            .as_deref()
            .unwrap_or(DEFAULT_STASH_MESSAGE)
    }

    /// Where the shell saves state, if configured.
    pub fn state_file(&self) -> Option<&Path> {
        self.file.state_file.as_deref()
    }
}
