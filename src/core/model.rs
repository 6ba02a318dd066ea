//! core::model
//!
//! The repository state and its records.
//!
//! # Invariants
//!
//! - `current_branch` always names an entry of `branches`
//! - every local branch head is a local commit; every remote branch head
//!   is a remote commit
//! - every parent of a commit appears earlier in the same commit list
//!
//! [`crate::core::verify`] checks these on demand. Operations in
//! [`crate::engine::ops`] preserve them by construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::Position;
use super::types::{CommitId, UtcTimestamp};

/// Name of the branch every repository starts on.
pub const DEFAULT_BRANCH: &str = "main";

/// Name of the simulated remote.
pub const REMOTE_NAME: &str = "origin";

/// Message of the root commit.
pub const INITIAL_MESSAGE: &str = "Initial commit";

/// Tracking ref name for a remote branch, e.g. `origin/main`.
pub fn tracking_ref(branch: &str) -> String {
    format!("{REMOTE_NAME}/{branch}")
}

/// A local commit.
///
/// Commits never change after creation. `branch` records the lane the
/// commit was created on; it does not pin the commit to that branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: CommitId,
    pub message: String,
    pub branch: String,
    /// 0 parents for the root, 1 for a normal commit, 2 for a merge
    /// (`[prior tip, merged-in tip]`).
    pub parents: Vec<CommitId>,
    #[serde(flatten)]
    pub position: Position,
    pub timestamp: UtcTimestamp,
    #[serde(default)]
    pub is_merge: bool,
    /// Branch merged in, or `origin/<branch>` for pulls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_source: Option<String>,
    /// Imported from the remote by a pull.
    #[serde(default)]
    pub is_remote: bool,
    /// Original commit this one was replayed from by a rebase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebased_from: Option<CommitId>,
}

/// A local branch pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    pub head: CommitId,
    pub color: String,
    /// Creation order index; doubles as display lane.
    pub row: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CommitId>,
}

/// A saved-but-uncommitted piece of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashEntry {
    /// Random token in the commit-id format.
    pub id: CommitId,
    pub message: String,
    pub created_at: UtcTimestamp,
}

/// A commit on the simulated remote. No layout fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCommit {
    pub id: CommitId,
    pub message: String,
    pub branch: String,
    pub parents: Vec<CommitId>,
    pub timestamp: UtcTimestamp,
}

impl From<&Commit> for RemoteCommit {
    fn from(commit: &Commit) -> Self {
        Self {
            id: commit.id.clone(),
            message: commit.message.clone(),
            branch: commit.branch.clone(),
            parents: commit.parents.clone(),
            timestamp: commit.timestamp.clone(),
        }
    }
}

/// A branch on the simulated remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBranch {
    pub name: String,
    pub head: CommitId,
    pub color: String,
    pub row: u32,
}

/// The simulated remote: an independent commit graph with its own branches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteState {
    pub commits: Vec<RemoteCommit>,
    pub branches: BTreeMap<String, RemoteBranch>,
}

impl RemoteState {
    /// Build a remote that mirrors the local graph exactly.
    pub fn mirror(local: &RepoState) -> Self {
        Self {
            commits: local.commits.iter().map(RemoteCommit::from).collect(),
            branches: local
                .branches
                .values()
                .map(|b| {
                    (
                        b.name.clone(),
                        RemoteBranch {
                            name: b.name.clone(),
                            head: b.head.clone(),
                            color: b.color.clone(),
                            row: b.row,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Look up a remote commit by id.
    pub fn commit(&self, id: &CommitId) -> Option<&RemoteCommit> {
        self.commits.iter().find(|c| &c.id == id)
    }

    /// Whether the remote holds a commit with this id.
    pub fn contains(&self, id: &CommitId) -> bool {
        self.commit(id).is_some()
    }
}

/// Informational copy of the tutorial cursor, kept for persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialCursor {
    pub active_id: Option<String>,
    pub step_index: usize,
}

/// The complete repository snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoState {
    /// All local commits in creation order.
    pub commits: Vec<Commit>,
    pub branches: BTreeMap<String, Branch>,
    pub current_branch: String,
    pub commit_counter: u64,
    pub branch_counter: u64,
    /// Newest entry first.
    pub stash: Vec<StashEntry>,
    pub remote: RemoteState,
    /// `origin/<branch>` to last fetched head.
    pub remote_tracking: BTreeMap<String, CommitId>,
    pub tutorial: TutorialCursor,
}

impl RepoState {
    /// A fresh repository: one root commit on `main`, mirrored to the remote.
    pub fn initial(palette: &[String]) -> Self {
        let root = Commit {
            id: CommitId::generate(),
            message: INITIAL_MESSAGE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            parents: vec![],
            position: Position::new(0, 0),
            timestamp: UtcTimestamp::now(),
            is_merge: false,
            merge_source: None,
            is_remote: false,
            rebased_from: None,
        };
        let main = Branch {
            name: DEFAULT_BRANCH.to_string(),
            head: root.id.clone(),
            color: palette.first().cloned().unwrap_or_default(),
            row: 0,
            created_from: None,
            created_at: None,
        };

        let mut state = Self {
            commits: vec![root.clone()],
            branches: BTreeMap::from([(main.name.clone(), main)]),
            current_branch: DEFAULT_BRANCH.to_string(),
            commit_counter: 1,
            branch_counter: 1,
            stash: vec![],
            remote: RemoteState::default(),
            remote_tracking: BTreeMap::from([(tracking_ref(DEFAULT_BRANCH), root.id)]),
            tutorial: TutorialCursor::default(),
        };
        state.remote = RemoteState::mirror(&state);
        state
    }

    /// Look up a local commit by id.
    pub fn commit(&self, id: &CommitId) -> Option<&Commit> {
        self.commits.iter().find(|c| &c.id == id)
    }

    /// Whether a local commit with this id exists.
    pub fn contains(&self, id: &CommitId) -> bool {
        self.commit(id).is_some()
    }

    /// The checked-out branch.
    pub fn current(&self) -> Option<&Branch> {
        self.branches.get(&self.current_branch)
    }

    /// Head of a local branch.
    pub fn head_of(&self, branch: &str) -> Option<&CommitId> {
        self.branches.get(branch).map(|b| &b.head)
    }

    /// Commits created on the lane of `branch`.
    pub fn commits_on(&self, branch: &str) -> impl Iterator<Item = &Commit> + '_ {
        let branch = branch.to_string();
        self.commits.iter().filter(move |c| c.branch == branch)
    }

    /// The commit the named branch points at.
    pub fn head_commit(&self, branch: &str) -> Option<&Commit> {
        self.head_of(branch).and_then(|id| self.commit(id))
    }
}
