//! core::graph
//!
//! Ancestry algorithms over a commit list.
//!
//! # Architecture
//!
//! The commit graph is a DAG where:
//! - Nodes are commits (local or remote)
//! - Edges point from child to parent (stored in each commit's `parents`)
//! - Roots are commits with no parents
//!
//! All traversals tolerate malformed input: an id that does not resolve to a
//! commit is a dead end, and revisits are skipped, so every walk terminates.

use std::collections::{HashMap, HashSet, VecDeque};

use super::model::{Commit, RemoteCommit};
use super::types::CommitId;

/// A node in a commit graph.
pub trait GraphNode {
    /// Commit id.
    fn id(&self) -> &CommitId;
    /// Parent ids, in order.
    fn parents(&self) -> &[CommitId];
}

impl GraphNode for Commit {
    fn id(&self) -> &CommitId {
        &self.id
    }

    fn parents(&self) -> &[CommitId] {
        &self.parents
    }
}

impl GraphNode for RemoteCommit {
    fn id(&self) -> &CommitId {
        &self.id
    }

    fn parents(&self) -> &[CommitId] {
        &self.parents
    }
}

fn index<N: GraphNode>(commits: &[N]) -> HashMap<&CommitId, &N> {
    commits.iter().map(|c| (c.id(), c)).collect()
}

/// All ids reachable from `start` through parent edges, including `start`.
///
/// # Example
///
/// ```
/// use gitsim::core::graph::collect_ancestors;
/// use gitsim::core::model::RepoState;
///
/// let state = RepoState::initial(&["#fff".to_string()]);
/// let root = &state.commits[0].id;
/// let ancestors = collect_ancestors(&state.commits, root);
/// assert_eq!(ancestors.len(), 1);
/// assert!(ancestors.contains(root));
/// ```
pub fn collect_ancestors<N: GraphNode>(commits: &[N], start: &CommitId) -> HashSet<CommitId> {
    let by_id = index(commits);
    let mut visited = HashSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        if let Some(commit) = by_id.get(current) {
            stack.extend(commit.parents());
        }
    }

    visited
}

/// Whether `ancestor` is reachable from `descendant` (a commit is its own
/// ancestor).
pub fn is_ancestor<N: GraphNode>(commits: &[N], ancestor: &CommitId, descendant: &CommitId) -> bool {
    collect_ancestors(commits, descendant).contains(ancestor)
}

/// First commit reachable from `b`, breadth-first, that is also an ancestor
/// of `a`.
///
/// This is *a* common ancestor, not necessarily the lowest one when several
/// merge paths exist. Nothing in the engine depends on it.
pub fn find_common_ancestor<N: GraphNode>(
    commits: &[N],
    a: &CommitId,
    b: &CommitId,
) -> Option<CommitId> {
    let ancestors_a = collect_ancestors(commits, a);
    let by_id = index(commits);
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([b]);

    while let Some(current) = queue.pop_front() {
        if ancestors_a.contains(current) {
            return Some(current.clone());
        }
        if !seen.insert(current) {
            continue;
        }
        if let Some(commit) = by_id.get(current) {
            queue.extend(commit.parents());
        }
    }

    None
}

/// The first-parent chain starting at `head`, newest first.
pub fn first_parent_chain<'a, N: GraphNode>(commits: &'a [N], head: &CommitId) -> Vec<&'a N> {
    let by_id = index(commits);
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = by_id.get(head).copied();

    while let Some(commit) = current {
        if !seen.insert(commit.id()) {
            break;
        }
        chain.push(commit);
        current = commit.parents().first().and_then(|p| by_id.get(p).copied());
    }

    chain
}
