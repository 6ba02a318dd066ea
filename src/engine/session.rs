//! engine::session
//!
//! The single entry point for user intents.
//!
//! # Lifecycle
//!
//! ```text
//! Intent -> GitOps transaction -> [record history] -> evaluate tutorial -> SessionReport
//! ```
//!
//! Undo, redo, and reset bypass the transaction protocol and install whole
//! states through [`StateManager::replace_state`](super::manager::StateManager::replace_state).
//!
//! # Invariants
//!
//! - History gets exactly one new snapshot per applied operation
//! - Aborted intents change neither state nor history
//! - The tutorial is only evaluated after something was applied

use thiserror::Error;

use crate::core::config::Config;
use crate::core::model::RepoState;
use crate::core::snapshot::{SnapshotError, SnapshotStore};
use crate::tutorial::{StepAdvance, Tutorial, TutorialEngine, TutorialError};

use super::history::HistoryManager;
use super::ops::{ConflictPreview, GitOps, OpSettings};
use super::outcome::{Applied, Explanation, Outcome};

/// Something the user asked the simulator to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Commit { message: Option<String> },
    Branch { name: String },
    Checkout { name: String },
    Merge { source: String },
    ResolveConflict { source: String },
    Rebase { target: String },
    CherryPick { commit: String },
    StashSave { message: Option<String> },
    StashApply,
    StashPop,
    StashDrop,
    Fetch,
    Push,
    Pull,
    RemoteCommit,
    Undo,
    Redo,
    Reset,
}

/// What happened in response to an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: Outcome,
    /// Tutorial step completed by this intent, if any.
    pub tutorial: Option<StepAdvance>,
}

/// Errors from session persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no state file configured")]
    NoStore,

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Operations engine, history, and tutorial progress for one user.
#[derive(Debug)]
pub struct Session {
    ops: GitOps,
    history: HistoryManager,
    tutorials: TutorialEngine,
    store: Option<SnapshotStore>,
}

impl Session {
    /// Session over a fresh repository, configured from `config`.
    pub fn new(config: &Config) -> Self {
        let mut session = Self::with_parts(
            OpSettings::from_config(config),
            config.history_limit(),
            TutorialEngine::default(),
        );
        session.store = config.state_file().map(SnapshotStore::new);
        session
    }

    /// Session from explicit parts, without persistence.
    pub fn with_parts(settings: OpSettings, history_limit: usize, tutorials: TutorialEngine) -> Self {
        let ops = GitOps::new(settings);
        let mut history = HistoryManager::new(history_limit);
        history.seed(&ops.snapshot());
        Self {
            ops,
            history,
            tutorials,
            store: None,
        }
    }

    /// Persist to `store` instead of the configured state file.
    pub fn with_store(mut self, store: SnapshotStore) -> Self {
        self.store = Some(store);
        self
    }

    /// A deep copy of the current repository state.
    pub fn state(&self) -> RepoState {
        self.ops.snapshot()
    }

    /// The operations engine.
    pub fn ops(&self) -> &GitOps {
        &self.ops
    }

    /// The undo/redo timeline.
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Tutorial progress.
    pub fn tutorials(&self) -> &TutorialEngine {
        &self.tutorials
    }

    /// The snapshot store, if persistence is configured.
    pub fn store(&self) -> Option<&SnapshotStore> {
        self.store.as_ref()
    }

    /// Run one intent to completion.
    pub fn execute(&mut self, intent: Intent) -> SessionReport {
        let records = !matches!(intent, Intent::Undo | Intent::Redo | Intent::Reset);
        let outcome = self.apply(intent);
        if records && outcome.is_applied() {
            self.history.record(&self.ops.snapshot());
        }

        let tutorial = if outcome.is_applied() {
            self.ops
                .manager()
                .with_state(|state| self.tutorials.evaluate(state))
        } else {
            None
        };

        SessionReport { outcome, tutorial }
    }

    fn apply(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Undo => self.undo(),
            Intent::Redo => self.redo(),
            Intent::Reset => self.reset(),
            Intent::Commit { message } => self.ops.commit(message.as_deref()),
            Intent::Branch { name } => self.ops.branch(&name),
            Intent::Checkout { name } => self.ops.checkout(&name),
            Intent::Merge { source } => self.ops.merge(&source),
            Intent::ResolveConflict { source } => self.ops.resolve_conflict(&source),
            Intent::Rebase { target } => self.ops.rebase(&target),
            Intent::CherryPick { commit } => self.ops.cherry_pick(&commit),
            Intent::StashSave { message } => self.ops.stash_save(message.as_deref()),
            Intent::StashApply => self.ops.stash_apply(false),
            Intent::StashPop => self.ops.stash_apply(true),
            Intent::StashDrop => self.ops.stash_drop(),
            Intent::Fetch => self.ops.fetch(),
            Intent::Push => self.ops.push(),
            Intent::Pull => self.ops.pull(),
            Intent::RemoteCommit => self.ops.remote_commit(),
        }
    }

    fn undo(&mut self) -> Outcome {
        let current = self.ops.snapshot();
        match self.history.undo(&current) {
            Some(previous) => {
                self.ops.manager_mut().replace_state(previous, true);
                Applied::new(Explanation::Undo, "git reset --hard HEAD@{1}")
                    .with_full_render()
                    .into()
            }
            None => Outcome::abort("Nothing to undo."),
        }
    }

    fn redo(&mut self) -> Outcome {
        match self.history.redo() {
            Some(next) => {
                self.ops.manager_mut().replace_state(next, true);
                Applied::new(Explanation::Redo, "git reset --hard HEAD@{-1}")
                    .with_full_render()
                    .into()
            }
            None => Outcome::abort("Nothing to redo."),
        }
    }

    fn reset(&mut self) -> Outcome {
        let outcome = self.ops.reset_all();
        self.history.seed(&self.ops.snapshot());
        tracing::info!("session reset");
        outcome
    }

    /// Preview the canned conflict for merging `source`.
    pub fn preview_conflict(&self, source: &str) -> Result<ConflictPreview, String> {
        self.ops.preview_conflict(source)
    }

    /// Start a tutorial from its first step.
    pub fn start_tutorial(&mut self, id: &str) -> Result<Tutorial, TutorialError> {
        self.tutorials.start(id).copied()
    }

    /// Leave the active tutorial.
    pub fn stop_tutorial(&mut self) {
        self.tutorials.stop();
    }

    /// Save the current state with the tutorial cursor mirrored into it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoStore` without a store, or the underlying
    /// write failure.
    pub fn save(&self) -> Result<(), SessionError> {
        let store = self.store.as_ref().ok_or(SessionError::NoStore)?;
        let mut state = self.ops.snapshot();
        state.tutorial = self.tutorials.cursor();
        store.save(&state)?;
        tracing::debug!(path = %store.path().display(), "state saved");
        Ok(())
    }

    /// Replace the current state with the saved one.
    ///
    /// Returns `false` when there is nothing usable to load; the current
    /// state is kept in that case. History is re-seeded on success.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoStore` without a store, or a read failure
    /// on an existing file.
    pub fn load(&mut self) -> Result<bool, SessionError> {
        let store = self.store.as_ref().ok_or(SessionError::NoStore)?;
        let Some(state) = store.load()? else {
            return Ok(false);
        };

        tracing::info!(
            path = %store.path().display(),
            commits = state.commits.len(),
            "state loaded"
        );
        self.tutorials.restore(&state.tutorial);
        self.history.seed(&state);
        self.ops.manager_mut().replace_state(state, true);
        Ok(true)
    }
}
