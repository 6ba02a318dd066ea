//! engine
//!
//! Runs git operations against the single authoritative repository state.
//!
//! # Architecture
//!
//! 1. **Manager**: owns the state; every change is a transaction on a draft
//! 2. **Ops**: one transaction per git operation, returning an [`Outcome`]
//! 3. **History**: full-state snapshots for undo/redo
//! 4. **Session**: routes an [`Intent`] through ops, history, and tutorials
//!
//! ```text
//! Intent -> Session -> GitOps -> StateManager::mutate -> Outcome
//!                  \-> HistoryManager::record
//!                  \-> TutorialEngine::evaluate
//! ```
//!
//! # Invariants
//!
//! - Expected failures are `Outcome::Abort`, never `Err` or a panic
//! - An aborted transaction leaves no trace in state or history

pub mod history;
pub mod manager;
pub mod ops;
pub mod outcome;
pub mod session;

pub use history::HistoryManager;
pub use manager::{Listener, StateManager, SubscriptionId};
pub use ops::{ConflictPreview, GitOps, OpSettings};
pub use outcome::{Applied, Explanation, Outcome, OutcomeData};
pub use session::{Intent, Session, SessionError, SessionReport};
