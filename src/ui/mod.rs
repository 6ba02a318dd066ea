//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and line formats
//! - [`explain`] - Teaching notes per operation
//!
//! # Design
//!
//! All shell output goes through this module so that quiet mode and
//! formatting are handled in one place.

pub mod explain;
pub mod output;
