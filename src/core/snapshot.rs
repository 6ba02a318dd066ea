//! core::snapshot
//!
//! Versioned persistence envelope for repository state.
//!
//! ```json
//! { "version": 1, "savedAt": "2024-01-01T00:00:00Z", "state": { ... } }
//! ```
//!
//! Loading is forgiving: unreadable JSON, a different `version`, or a state
//! that fails [`verify_state`] decodes to `None`, which callers treat as
//! "nothing saved".

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::RepoState;
use super::types::UtcTimestamp;
use super::verify::verify_state;

/// Current envelope version.
pub const STORAGE_VERSION: u32 = 1;

/// Errors from writing or reading a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write snapshot '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// The on-disk wrapper around a [`RepoState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub version: u32,
    pub saved_at: UtcTimestamp,
    pub state: RepoState,
}

/// Only the version, so mismatches are caught before the state is parsed.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Serialize `state` into a current-version envelope.
pub fn encode(state: &RepoState) -> Result<String, SnapshotError> {
    let envelope = Envelope {
        version: STORAGE_VERSION,
        saved_at: UtcTimestamp::now(),
        state: state.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse an envelope, returning `None` on any parse failure, version
/// mismatch, or broken invariant.
pub fn decode(raw: &str) -> Option<RepoState> {
    let probe: VersionProbe = match serde_json::from_str(raw) {
        Ok(probe) => probe,
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable saved state");
            return None;
        }
    };
    if probe.version != STORAGE_VERSION {
        tracing::warn!(
            found = probe.version,
            expected = STORAGE_VERSION,
            "discarding saved state with unsupported version"
        );
        return None;
    }

    let state = match serde_json::from_str::<Envelope>(raw) {
        Ok(envelope) => envelope.state,
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed saved state");
            return None;
        }
    };

    let result = verify_state(&state);
    if !result.ok {
        let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        tracing::warn!(errors = ?errors, "discarding saved state that breaks invariants");
        return None;
    }
    Some(state)
}

/// File-backed snapshot storage.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store rooted at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state. A missing, corrupt, or outdated file is `None`.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::ReadError` only when the file exists but
    /// cannot be read.
    pub fn load(&self) -> Result<Option<RepoState>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| SnapshotError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(decode(&raw))
    }

    /// Save `state`, replacing any previous snapshot.
    ///
    /// Writes to a temporary sibling first, then renames over the target.
    pub fn save(&self, state: &RepoState) -> Result<(), SnapshotError> {
        let contents = encode(state)?;
        let write_err = |e| SnapshotError::WriteError {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, contents).map_err(write_err)?;
        fs::rename(&temp_path, &self.path).map_err(write_err)?;
        Ok(())
    }

    /// Remove the saved snapshot, if any.
    pub fn clear(&self) -> Result<(), SnapshotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SnapshotError::WriteError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RepoState {
        RepoState::initial(&["#fff".to_string()])
    }

    #[test]
    fn envelope_carries_version() {
        let raw = encode(&state()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], STORAGE_VERSION);
        assert!(value.get("savedAt").is_some());
        assert!(value["state"].get("currentBranch").is_some());
    }

    #[test]
    fn decode_restores_state() {
        let original = state();
        let decoded = decode(&encode(&original).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn version_mismatch_is_none() {
        let raw = encode(&state()).unwrap().replacen("\"version\": 1", "\"version\": 2", 1);
        assert!(decode(&raw).is_none());
    }

    #[test]
    fn garbage_is_none() {
        assert!(decode("not json").is_none());
        assert!(decode("{\"version\": 1, \"state\": 42}").is_none());
    }

    #[test]
    fn broken_invariants_are_none() {
        let mut missing_branch = state();
        missing_branch.current_branch = "ghost".into();
        assert!(decode(&encode(&missing_branch).unwrap()).is_none());

        let mut out_of_order = state();
        let mut child = out_of_order.commits[0].clone();
        child.id = crate::core::types::CommitId::new("abcdef1").unwrap();
        out_of_order.commits[0].parents = vec![child.id.clone()];
        child.parents.clear();
        out_of_order.commits.push(child);
        assert!(decode(&encode(&out_of_order).unwrap()).is_none());
    }

    #[test]
    fn store_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested/state.json"));

        assert!(store.load().unwrap().is_none());

        let original = state();
        store.save(&original).unwrap();
        assert_eq!(store.load().unwrap(), Some(original));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }
}
