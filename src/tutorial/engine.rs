//! tutorial::engine
//!
//! Step cursor for the active tutorial.
//!
//! # Lifecycle
//!
//! - `start` activates a tutorial and puts the cursor on step 0
//! - `evaluate` advances the cursor by one when the current step's
//!   predicate holds against the given snapshot
//! - `stop` deactivates and resets the cursor
//!
//! Progress only moves forward, one step per evaluation. Completed steps
//! are never re-checked.

use thiserror::Error;

use crate::core::model::{RepoState, TutorialCursor};

use super::catalog::{Step, Tutorial};
use super::checks::PredicateRegistry;

/// Errors from tutorial control.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TutorialError {
    #[error("Tutorial not found.")]
    NotFound(String),
}

/// A step that was just completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepAdvance {
    /// The step whose predicate held.
    pub completed: Step,
    /// The new current step, or `None` if the tutorial is finished.
    pub next: Option<Step>,
}

/// Tutorial step tracker.
#[derive(Debug)]
pub struct TutorialEngine {
    tutorials: Vec<Tutorial>,
    checks: PredicateRegistry,
    active: Option<usize>,
    step_index: usize,
}

impl Default for TutorialEngine {
    fn default() -> Self {
        Self::new(super::catalog::TUTORIALS.to_vec(), super::catalog::builtin_checks())
    }
}

impl TutorialEngine {
    /// Engine over `tutorials`, judged by `checks`.
    pub fn new(tutorials: Vec<Tutorial>, checks: PredicateRegistry) -> Self {
        Self {
            tutorials,
            checks,
            active: None,
            step_index: 0,
        }
    }

    /// All known tutorials.
    pub fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    /// Activate a tutorial and reset the cursor.
    ///
    /// # Errors
    ///
    /// Returns `TutorialError::NotFound` if `id` is unknown; the current
    /// tutorial (if any) stays active.
    pub fn start(&mut self, id: &str) -> Result<&Tutorial, TutorialError> {
        let index = self
            .tutorials
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TutorialError::NotFound(id.to_string()))?;
        self.active = Some(index);
        self.step_index = 0;
        tracing::info!(tutorial = id, "tutorial started");
        Ok(&self.tutorials[index])
    }

    /// Deactivate and reset the cursor.
    pub fn stop(&mut self) {
        self.active = None;
        self.step_index = 0;
    }

    /// The active tutorial.
    pub fn active(&self) -> Option<&Tutorial> {
        self.active.and_then(|i| self.tutorials.get(i))
    }

    /// Index of the current step.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// The step waiting to be completed.
    pub fn current_step(&self) -> Option<Step> {
        self.active()
            .and_then(|t| t.steps.get(self.step_index))
            .copied()
    }

    /// Whether the active tutorial has no steps left.
    pub fn is_complete(&self) -> bool {
        self.active()
            .is_some_and(|t| self.step_index >= t.steps.len())
    }

    /// Check the current step against `state` and advance if it holds.
    pub fn evaluate(&mut self, state: &RepoState) -> Option<StepAdvance> {
        let tutorial = *self.active()?;
        let step = *tutorial.steps.get(self.step_index)?;

        if !self.checks.holds(tutorial.id, step.id, state) {
            return None;
        }

        self.step_index += 1;
        let next = tutorial.steps.get(self.step_index).copied();
        tracing::debug!(tutorial = tutorial.id, step = step.id, "tutorial step completed");
        Some(StepAdvance {
            completed: step,
            next,
        })
    }

    /// The cursor in persisted form.
    pub fn cursor(&self) -> TutorialCursor {
        TutorialCursor {
            active_id: self.active().map(|t| t.id.to_string()),
            step_index: self.step_index,
        }
    }

    /// Resume from a persisted cursor. Unknown tutorials stop the engine;
    /// the step index is clamped to the tutorial length.
    pub fn restore(&mut self, cursor: &TutorialCursor) {
        let index = cursor
            .active_id
            .as_deref()
            .and_then(|id| self.tutorials.iter().position(|t| t.id == id));
        match index {
            Some(i) => {
                self.active = Some(i);
                self.step_index = cursor.step_index.min(self.tutorials[i].steps.len());
            }
            None => self.stop(),
        }
    }
}
