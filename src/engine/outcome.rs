//! engine::outcome
//!
//! The uniform result of every operation.
//!
//! An operation either aborts with a user-facing message, leaving state
//! untouched, or applies and reports which explanation to show, the
//! equivalent git command line, and the commits it created.

use serde::Serialize;

use crate::core::types::CommitId;

/// Explanation tag shown after a successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Explanation {
    Welcome,
    Commit,
    Branch,
    Checkout,
    Merge,
    Conflict,
    Rebase,
    CherryPick,
    StashSave,
    StashApply,
    StashPop,
    StashDrop,
    Fetch,
    Push,
    Pull,
    Undo,
    Redo,
}

impl Explanation {
    /// The tag as it appears on the wire.
    pub fn tag(self) -> &'static str {
        match self {
            Explanation::Welcome => "welcome",
            Explanation::Commit => "commit",
            Explanation::Branch => "branch",
            Explanation::Checkout => "checkout",
            Explanation::Merge => "merge",
            Explanation::Conflict => "conflict",
            Explanation::Rebase => "rebase",
            Explanation::CherryPick => "cherry-pick",
            Explanation::StashSave => "stash-save",
            Explanation::StashApply => "stash-apply",
            Explanation::StashPop => "stash-pop",
            Explanation::StashDrop => "stash-drop",
            Explanation::Fetch => "fetch",
            Explanation::Push => "push",
            Explanation::Pull => "pull",
            Explanation::Undo => "undo",
            Explanation::Redo => "redo",
        }
    }
}

impl std::fmt::Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Operation-specific details for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OutcomeData {
    Checkout { branch: String },
    Merge { source: String, target: String },
    Rebase { target: String },
    Pull { fast_forward: bool },
}

/// A successfully applied operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Applied {
    pub explanation: Explanation,
    /// Equivalent git command line. Cosmetic only.
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<OutcomeData>,
    /// Ask the renderer to redraw from scratch.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub full_render: bool,
    /// Commits created by this operation, oldest first. Renderer-facing;
    /// never persisted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub created: Vec<CommitId>,
}

impl Applied {
    /// An applied outcome with no extra data.
    pub fn new(explanation: Explanation, command: impl Into<String>) -> Self {
        Self {
            explanation,
            command: command.into(),
            data: None,
            full_render: false,
            created: vec![],
        }
    }

    /// Attach operation data.
    pub fn with_data(mut self, data: OutcomeData) -> Self {
        self.data = Some(data);
        self
    }

    /// Request a full redraw.
    pub fn with_full_render(mut self) -> Self {
        self.full_render = true;
        self
    }

    /// Record the commits this operation created.
    pub fn with_created(mut self, created: Vec<CommitId>) -> Self {
        self.created = created;
        self
    }
}

/// Result of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The operation was rejected; state is unchanged.
    Abort { abort: bool, error: String },
    /// The operation was applied.
    Applied(Applied),
}

impl Outcome {
    /// An aborted outcome.
    pub fn abort(error: impl Into<String>) -> Self {
        Outcome::Abort {
            abort: true,
            error: error.into(),
        }
    }

    /// Check if the operation was aborted.
    pub fn is_abort(&self) -> bool {
        matches!(self, Outcome::Abort { .. })
    }

    /// Check if the operation was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// The abort message, if aborted.
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Abort { error, .. } => Some(error),
            Outcome::Applied(_) => None,
        }
    }

    /// The applied record, if applied.
    pub fn applied(&self) -> Option<&Applied> {
        match self {
            Outcome::Applied(applied) => Some(applied),
            Outcome::Abort { .. } => None,
        }
    }

    /// Convert to a Result, treating an abort as an error.
    pub fn into_result(self) -> Result<Applied, String> {
        match self {
            Outcome::Applied(applied) => Ok(applied),
            Outcome::Abort { error, .. } => Err(error),
        }
    }
}

impl From<Applied> for Outcome {
    fn from(applied: Applied) -> Self {
        Outcome::Applied(applied)
    }
}
