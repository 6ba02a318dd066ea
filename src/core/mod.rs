//! core
//!
//! Domain model and pure algorithms for the simulator.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommitId, UtcTimestamp
//! - [`naming`] - Branch naming rules and validation
//! - [`graph`] - Ancestry queries over commit graphs
//! - [`layout`] - Lane positions for new commits
//! - [`model`] - Repository state: commits, branches, stash, remote
//! - [`verify`] - Structural checks over a repository state
//! - [`config`] - Configuration schema and loading
//! - [`snapshot`] - Versioned persistence envelope
//!
//! # Design Principles
//!
//! - Everything here is plain data plus pure functions
//! - Schemas are strict and self-describing
//! - Nothing in this layer mutates state it does not own

pub mod config;
pub mod graph;
pub mod layout;
pub mod model;
pub mod naming;
pub mod snapshot;
pub mod types;
pub mod verify;
