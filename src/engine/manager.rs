//! engine::manager
//!
//! Owner of the single authoritative repository state.
//!
//! # Transactions
//!
//! [`StateManager::mutate`] hands the mutator a private deep copy of the
//! state. If the mutator returns [`Outcome::Abort`], the copy is dropped and
//! nothing changes. Otherwise the copy replaces the authoritative state and
//! subscribers are notified. No partially applied change is ever visible.
//!
//! # Invariants
//!
//! - Readers only ever get owned copies; nothing outside holds a reference
//!   into the live state
//! - Subscribers receive their own copy of the new state

use crate::core::model::RepoState;

use super::outcome::Outcome;

/// Callback invoked with a copy of the state after every change.
pub type Listener = Box<dyn FnMut(&RepoState)>;

/// Handle returned by [`StateManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Transactional holder of the repository state.
pub struct StateManager {
    state: RepoState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for StateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateManager")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl StateManager {
    /// Create a manager holding `initial`.
    pub fn new(initial: RepoState) -> Self {
        Self {
            state: initial,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// A deep, independent copy of the current state.
    pub fn snapshot(&self) -> RepoState {
        self.state.clone()
    }

    /// Read the current state without copying.
    ///
    /// The borrow ends before any further mutation can happen.
    pub fn with_state<R>(&self, read: impl FnOnce(&RepoState) -> R) -> R {
        read(&self.state)
    }

    /// Install an entirely new state, bypassing the transaction protocol.
    pub fn replace_state(&mut self, next: RepoState, notify: bool) {
        self.state = next;
        if notify {
            self.notify();
        }
    }

    /// Run `mutator` against a draft copy and commit it unless it aborts.
    pub fn mutate<F>(&mut self, mutator: F) -> Outcome
    where
        F: FnOnce(&mut RepoState) -> Outcome,
    {
        let mut draft = self.state.clone();
        let outcome = mutator(&mut draft);

        match &outcome {
            Outcome::Abort { error, .. } => {
                tracing::debug!(%error, "transaction aborted");
            }
            Outcome::Applied(applied) => {
                tracing::debug!(
                    explanation = %applied.explanation,
                    command = %applied.command,
                    created = applied.created.len(),
                    "transaction committed"
                );
                self.state = draft;
                self.notify();
            }
        }

        outcome
    }

    /// Register a listener for state changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&RepoState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.state.clone();
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}
