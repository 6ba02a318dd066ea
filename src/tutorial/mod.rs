//! tutorial
//!
//! Guided exercises that watch the repository and tick off steps.
//!
//! # Modules
//!
//! - [`catalog`] - Built-in tutorials and their step predicates
//! - [`checks`] - Predicate registry keyed by tutorial and step
//! - [`engine`] - Active tutorial and step cursor

pub mod catalog;
pub mod checks;
pub mod engine;

pub use catalog::{builtin_checks, Step, Tutorial, TUTORIALS};
pub use checks::{Predicate, PredicateRegistry};
pub use engine::{StepAdvance, TutorialEngine, TutorialError};
