//! core::verify
//!
//! Repository state verification.
//!
//! Checks the structural invariants of a [`RepoState`]:
//! - every parent appears earlier in the commit list (implies acyclic)
//! - the current branch exists
//! - every local head resolves to a local commit
//! - every remote head and remote parent resolves inside the remote graph
//!
//! # Invariants
//!
//! - Never mutates the state
//! - Must be deterministic

use std::collections::HashSet;

use thiserror::Error;

use super::graph::GraphNode;
use super::model::RepoState;
use super::types::CommitId;

/// A violated invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("commit {commit} references parent {parent} that is not an earlier commit")]
    DanglingParent { commit: CommitId, parent: CommitId },

    #[error("duplicate commit id: {0}")]
    DuplicateCommit(CommitId),

    #[error("current branch does not exist: {0}")]
    CurrentBranchMissing(String),

    #[error("branch {branch} points at missing commit {head}")]
    DanglingHead { branch: String, head: CommitId },

    #[error("remote commit {commit} references parent {parent} that is not an earlier remote commit")]
    DanglingRemoteParent { commit: CommitId, parent: CommitId },

    #[error("remote branch {branch} points at missing commit {head}")]
    DanglingRemoteHead { branch: String, head: CommitId },
}

/// Result of verification.
#[derive(Debug)]
pub struct VerifyResult {
    /// Whether verification passed
    pub ok: bool,
    /// Errors found during verification
    pub errors: Vec<VerifyError>,
}

impl VerifyResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: vec![],
        }
    }

    /// Create a failed result with errors.
    pub fn failure(errors: Vec<VerifyError>) -> Self {
        Self { ok: false, errors }
    }
}

/// Check parent ordering for one graph, reporting violations via `dangling`.
fn check_parent_order<N, F>(commits: &[N], errors: &mut Vec<VerifyError>, dangling: F) -> HashSet<CommitId>
where
    N: GraphNode,
    F: Fn(CommitId, CommitId) -> VerifyError,
{
    let mut seen = HashSet::new();
    for commit in commits {
        for parent in commit.parents() {
            if !seen.contains(parent) {
                errors.push(dangling(commit.id().clone(), parent.clone()));
            }
        }
        if !seen.insert(commit.id().clone()) {
            errors.push(VerifyError::DuplicateCommit(commit.id().clone()));
        }
    }
    seen
}

/// Verify all structural invariants of `state`.
pub fn verify_state(state: &RepoState) -> VerifyResult {
    let mut errors = Vec::new();

    let local = check_parent_order(&state.commits, &mut errors, |commit, parent| {
        VerifyError::DanglingParent { commit, parent }
    });

    if !state.branches.contains_key(&state.current_branch) {
        errors.push(VerifyError::CurrentBranchMissing(state.current_branch.clone()));
    }

    for branch in state.branches.values() {
        if !local.contains(&branch.head) {
            errors.push(VerifyError::DanglingHead {
                branch: branch.name.clone(),
                head: branch.head.clone(),
            });
        }
    }

    let remote = check_parent_order(&state.remote.commits, &mut errors, |commit, parent| {
        VerifyError::DanglingRemoteParent { commit, parent }
    });

    for branch in state.remote.branches.values() {
        if !remote.contains(&branch.head) {
            errors.push(VerifyError::DanglingRemoteHead {
                branch: branch.name.clone(),
                head: branch.head.clone(),
            });
        }
    }

    if errors.is_empty() {
        VerifyResult::success()
    } else {
        VerifyResult::failure(errors)
    }
}
