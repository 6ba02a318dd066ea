//! gitsim - an interactive simulator of git's commit graph
//!
//! gitsim models a repository as plain data (commits, branches, a stash,
//! and a simulated `origin` remote) and replays git operations against it
//! so learners can watch what each command does to the graph.
//!
//! # Architecture
//!
//! - [`core`] - Domain model, graph algorithms, validation, config, persistence
//! - [`engine`] - Transactional state, git operations, undo/redo, sessions
//! - [`tutorial`] - Guided exercises checked against repository state
//! - [`cli`] - Interactive shell
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Every operation is all-or-nothing; an abort leaves state untouched
//! 2. Every parent reference resolves to an earlier commit in the graph
//! 3. State handed out of the engine never aliases the live state

pub mod cli;
pub mod core;
pub mod engine;
pub mod tutorial;
pub mod ui;
