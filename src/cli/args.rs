//! cli::args
//!
//! Argument definitions using clap derive.
//!
//! Two parsers live here: [`Cli`] for the process arguments, and
//! [`ShellLine`] for each line typed into the interactive shell.
//!
//! # Global Flags
//!
//! - `--state <file>`: Load from and save to this file
//! - `--config <file>`: Read configuration from this file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::Intent;

/// gitsim - an interactive git commit-graph simulator
#[derive(Parser, Debug)]
#[command(name = "gitsim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load from and save to this state file
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Read configuration from this file instead of the default locations
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(name = "gitsim", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted by the shell.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Record a commit on the current branch
    Commit {
        /// Commit message (random if omitted)
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Create a branch at the current head and switch to it
    Branch {
        /// Name of the new branch
        name: String,
    },

    /// Switch to another branch
    #[command(alias = "switch")]
    Checkout {
        /// Branch to switch to
        name: String,
    },

    /// Merge a branch into the current one
    Merge {
        /// Branch to merge in
        source: String,
    },

    /// Replay the current branch on top of another
    Rebase {
        /// Branch to rebase onto
        target: String,
    },

    /// Copy one commit onto the current branch
    CherryPick {
        /// Id of the commit to copy
        commit: String,
    },

    /// Save, apply, or drop stash entries
    Stash {
        #[command(subcommand)]
        action: StashAction,
    },

    /// Update remote-tracking refs from the remote
    Fetch,

    /// Send the current branch to the remote
    Push,

    /// Bring remote commits into the current branch
    Pull,

    /// Simulate another developer pushing to remote main
    RemoteCommit,

    /// Show a demo merge conflict for a branch
    Conflict {
        /// Branch that would be merged in
        source: String,
    },

    /// Resolve the demo conflict by merging
    Resolve {
        /// Branch to merge in
        source: String,
    },

    /// Go back one step
    Undo,

    /// Go forward one undone step
    Redo,

    /// Start over with a fresh repository
    Reset,

    /// Show commits reachable from the current branch
    Log {
        /// Show every commit in the graph
        #[arg(long)]
        all: bool,
    },

    /// Show branches, stash, and remote status
    Status,

    /// Guided exercises
    Tutorial {
        #[command(subcommand)]
        action: TutorialAction,
    },

    /// Save state to the state file
    Save,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Stash subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum StashAction {
    /// Push a new entry
    Save {
        /// Entry message
        #[arg(short, long)]
        message: Option<String>,
    },
    /// Re-apply the top entry and keep it
    Apply,
    /// Re-apply the top entry and remove it
    Pop,
    /// Remove the top entry
    Drop,
}

/// Tutorial subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TutorialAction {
    /// List available tutorials
    List,
    /// Start a tutorial
    Start {
        /// Tutorial id
        id: String,
    },
    /// Leave the active tutorial
    Stop,
    /// Show progress in the active tutorial
    Status,
}

impl ShellCommand {
    /// The session intent for state-changing commands.
    pub fn intent(&self) -> Option<Intent> {
        let intent = match self {
            ShellCommand::Commit { message } => Intent::Commit {
                message: message.clone(),
            },
            ShellCommand::Branch { name } => Intent::Branch { name: name.clone() },
            ShellCommand::Checkout { name } => Intent::Checkout { name: name.clone() },
            ShellCommand::Merge { source } => Intent::Merge {
                source: source.clone(),
            },
            ShellCommand::Rebase { target } => Intent::Rebase {
                target: target.clone(),
            },
            ShellCommand::CherryPick { commit } => Intent::CherryPick {
                commit: commit.clone(),
            },
            ShellCommand::Stash { action } => match action {
                StashAction::Save { message } => Intent::StashSave {
                    message: message.clone(),
                },
                StashAction::Apply => Intent::StashApply,
                StashAction::Pop => Intent::StashPop,
                StashAction::Drop => Intent::StashDrop,
            },
            ShellCommand::Fetch => Intent::Fetch,
            ShellCommand::Push => Intent::Push,
            ShellCommand::Pull => Intent::Pull,
            ShellCommand::RemoteCommit => Intent::RemoteCommit,
            ShellCommand::Resolve { source } => Intent::ResolveConflict {
                source: source.clone(),
            },
            ShellCommand::Undo => Intent::Undo,
            ShellCommand::Redo => Intent::Redo,
            ShellCommand::Reset => Intent::Reset,
            ShellCommand::Conflict { .. }
            | ShellCommand::Log { .. }
            | ShellCommand::Status
            | ShellCommand::Tutorial { .. }
            | ShellCommand::Save
            | ShellCommand::Quit => return None,
        };
        Some(intent)
    }
}

/// Errors from splitting a shell line into words.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
}

/// Split a line into words, honouring single and double quotes and
/// backslash escapes outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(SplitError::UnterminatedQuote(q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
