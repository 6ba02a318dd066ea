//! engine::history
//!
//! Undo/redo over full-state snapshots.
//!
//! # Model
//!
//! `past` holds recorded snapshots, oldest first; its last entry is the
//! baseline for the current state. `future` holds states that were undone,
//! most recent last. Every snapshot is an owned deep copy, so nothing handed
//! in or out aliases the stored timeline.
//!
//! # Invariants
//!
//! - `past.len() <= limit`
//! - recording clears `future`
//! - undo never removes the last remaining baseline

use std::collections::VecDeque;

use crate::core::config::DEFAULT_HISTORY_LIMIT;
use crate::core::model::RepoState;

/// Bounded undo/redo stack.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    past: VecDeque<RepoState>,
    future: Vec<RepoState>,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryManager {
    /// Empty history keeping at most `limit` snapshots (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Maximum number of recorded snapshots.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Reset the timeline to just `initial`.
    pub fn seed(&mut self, initial: &RepoState) {
        self.past.clear();
        self.past.push_back(initial.clone());
        self.future.clear();
    }

    /// Record a new forward state. Invalidates redo.
    pub fn record(&mut self, snapshot: &RepoState) {
        self.past.push_back(snapshot.clone());
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
    }

    /// Whether there is a state to go back to.
    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    /// Whether there is an undone state to return to.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Step back. `current` is saved for redo; returns the state to restore.
    pub fn undo(&mut self, current: &RepoState) -> Option<RepoState> {
        if !self.can_undo() {
            return None;
        }
        self.past.pop_back();
        self.future.push(current.clone());
        self.past.back().cloned()
    }

    /// Step forward. The redone state becomes the new baseline; returns
    /// the state to restore.
    pub fn redo(&mut self) -> Option<RepoState> {
        let next = self.future.pop()?;
        self.past.push_back(next.clone());
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        Some(next)
    }

    /// Number of recorded snapshots, baseline included.
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of redoable snapshots.
    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}
