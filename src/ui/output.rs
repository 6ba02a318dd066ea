//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Results go to stdout and respect the quiet flag. Abort messages are
//! transient status lines on stderr and are always shown.

use std::fmt::Display;

use crate::core::model::{Branch, Commit, StashEntry};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a rejected operation (always shown).
pub fn rejected(message: impl Display) {
    eprintln!("rejected: {}", message);
}

/// Format a branch line, marking the checked-out one.
pub fn format_branch(branch: &Branch, current: bool) -> String {
    let marker = if current { "*" } else { " " };
    format!("{} {} -> {}", marker, branch.name, branch.head)
}

/// Format a commit as a one-line log entry.
pub fn format_commit(commit: &Commit) -> String {
    let mut tags = Vec::new();
    if let Some(source) = &commit.merge_source {
        tags.push(format!("merge from {source}"));
    }
    if let Some(original) = &commit.rebased_from {
        tags.push(format!("rebased from {original}"));
    }
    if commit.is_remote {
        tags.push("from remote".to_string());
    }

    let mut line = format!("{} [{}] {}", commit.id, commit.branch, commit.message);
    if !tags.is_empty() {
        line.push_str(&format!(" ({})", tags.join(", ")));
    }
    line
}

/// Format a stash entry with its stack index.
pub fn format_stash(index: usize, entry: &StashEntry) -> String {
    format!("stash@{{{}}}: {}", index, entry.message)
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
