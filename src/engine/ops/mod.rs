//! engine::ops
//!
//! Git operations as state transactions.
//!
//! Every public operation on [`GitOps`] runs as exactly one
//! [`StateManager::mutate`] transaction and returns an [`Outcome`].
//! Preconditions are checked inside the transaction; a failed check aborts
//! with a user-facing message and leaves the state untouched.
//!
//! # Modules
//!
//! - `local` - commit, branch, checkout, merge, rebase, cherry-pick, conflict demo
//! - `stash` - stash save/apply/pop/drop
//! - `remote` - fetch, push, pull, simulated remote commits

mod local;
mod remote;
mod stash;

pub use local::{ConflictPreview, CONFLICT_EXAMPLES};

use rand::seq::IndexedRandom;

use crate::core::config::Config;
use crate::core::layout::next_position;
use crate::core::model::{Commit, RepoState};
use crate::core::types::{CommitId, UtcTimestamp};

use super::manager::StateManager;
use super::outcome::{Applied, Explanation, Outcome};

/// Abort message when the checked-out branch is missing.
pub(crate) const NO_CURRENT_BRANCH: &str = "Current branch does not exist.";

/// Settings the operations read from configuration.
#[derive(Debug, Clone)]
pub struct OpSettings {
    /// Branch colour cycle. Never empty.
    pub palette: Vec<String>,
    /// Pool for commits created without a message. Never empty.
    pub commit_messages: Vec<String>,
    /// Message for stash entries saved without one.
    pub default_stash_message: String,
}

impl OpSettings {
    /// Extract operation settings from a loaded config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            palette: config.palette().to_vec(),
            commit_messages: config.commit_messages().to_vec(),
            default_stash_message: config.default_stash_message().to_string(),
        }
    }

    /// Colour for a branch created at `row`.
    pub fn color_for_row(&self, row: u32) -> String {
        if self.palette.is_empty() {
            return String::new();
        }
        self.palette[row as usize % self.palette.len()].clone()
    }

    /// A random message from the pool.
    pub fn random_message(&self) -> String {
        self.commit_messages
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(|| "Update".to_string())
    }

    /// Use `message` unless it is missing or blank, otherwise pick one at random.
    pub(crate) fn message_or_random(&self, message: Option<&str>) -> String {
        match message.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.random_message(),
        }
    }
}

impl Default for OpSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Parameters for a commit created by an operation.
#[derive(Debug, Default)]
pub(crate) struct NewCommit {
    pub message: String,
    pub parents: Vec<CommitId>,
    pub merge_source: Option<String>,
    pub rebased_from: Option<CommitId>,
}

impl NewCommit {
    pub fn on(parent: CommitId, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            parents: vec![parent],
            ..Default::default()
        }
    }
}

/// Append a commit on the lane of `branch` and advance that branch to it.
pub(crate) fn create_commit_on_branch(
    state: &mut RepoState,
    branch: &str,
    new: NewCommit,
) -> CommitId {
    let row = state.branches.get(branch).map(|b| b.row).unwrap_or(0);
    let commit = Commit {
        id: CommitId::generate(),
        message: new.message,
        branch: branch.to_string(),
        parents: new.parents,
        position: next_position(&state.commits, row),
        timestamp: UtcTimestamp::now(),
        is_merge: new.merge_source.is_some(),
        merge_source: new.merge_source,
        is_remote: false,
        rebased_from: new.rebased_from,
    };
    let id = commit.id.clone();

    state.commits.push(commit);
    if let Some(b) = state.branches.get_mut(branch) {
        b.head = id.clone();
    }
    state.commit_counter += 1;
    id
}

/// The git operations engine.
#[derive(Debug)]
pub struct GitOps {
    manager: StateManager,
    settings: OpSettings,
}

impl GitOps {
    /// Engine over a fresh initial repository.
    pub fn new(settings: OpSettings) -> Self {
        let initial = RepoState::initial(&settings.palette);
        Self::with_state(settings, initial)
    }

    /// Engine over an existing state.
    pub fn with_state(settings: OpSettings, state: RepoState) -> Self {
        Self {
            manager: StateManager::new(state),
            settings,
        }
    }

    /// The operation settings.
    pub fn settings(&self) -> &OpSettings {
        &self.settings
    }

    /// The underlying state manager.
    pub fn manager(&self) -> &StateManager {
        &self.manager
    }

    /// Mutable access for subscriptions and history restores.
    pub fn manager_mut(&mut self) -> &mut StateManager {
        &mut self.manager
    }

    /// A deep copy of the current state.
    pub fn snapshot(&self) -> RepoState {
        self.manager.snapshot()
    }

    /// Install a fresh repository.
    pub fn initialize(&mut self) -> Outcome {
        self.manager
            .replace_state(RepoState::initial(&self.settings.palette), true);
        Applied::new(Explanation::Welcome, "git init").into()
    }

    /// Install a fresh repository and ask for a full redraw.
    pub fn reset_all(&mut self) -> Outcome {
        match self.initialize() {
            Outcome::Applied(applied) => applied.with_full_render().into(),
            abort => abort,
        }
    }
}
