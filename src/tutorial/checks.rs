//! tutorial::checks
//!
//! Registry of step predicates keyed by `(tutorial id, step id)`.
//!
//! Predicates are pure functions of a repository snapshot. Keeping them
//! outside the tutorial data and the engine lets tests swap them freely.

use std::collections::HashMap;

use crate::core::model::RepoState;

/// A pure check over repository state.
pub type Predicate = Box<dyn Fn(&RepoState) -> bool>;

/// Lookup table from `(tutorial, step)` to predicate.
#[derive(Default)]
pub struct PredicateRegistry {
    checks: HashMap<(String, String), Predicate>,
}

impl std::fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.checks.keys().collect();
        keys.sort();
        f.debug_struct("PredicateRegistry").field("checks", &keys).finish()
    }
}

impl PredicateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the predicate for a step.
    pub fn register(
        &mut self,
        tutorial: &str,
        step: &str,
        predicate: impl Fn(&RepoState) -> bool + 'static,
    ) {
        self.checks
            .insert((tutorial.to_string(), step.to_string()), Box::new(predicate));
    }

    /// The predicate for a step, if registered.
    pub fn get(&self, tutorial: &str, step: &str) -> Option<&Predicate> {
        self.checks.get(&(tutorial.to_string(), step.to_string()))
    }

    /// Evaluate a step's predicate. Unregistered steps never pass.
    pub fn holds(&self, tutorial: &str, step: &str, state: &RepoState) -> bool {
        self.get(tutorial, step).is_some_and(|check| check(state))
    }

    /// Number of registered predicates.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no predicates are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
