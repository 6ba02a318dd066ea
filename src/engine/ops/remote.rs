//! Remote synchronization operations.
//!
//! The remote is a second commit graph inside the same state. Fetch copies
//! remote heads into tracking refs, push copies local history out, and pull
//! imports remote history and then fast-forwards or merges.

use std::collections::HashSet;

use crate::core::graph::{collect_ancestors, is_ancestor};
use crate::core::layout::next_position;
use crate::core::model::{
    tracking_ref, Commit, RemoteBranch, RemoteCommit, RepoState, DEFAULT_BRANCH,
};
use crate::core::types::{CommitId, UtcTimestamp};
use crate::engine::outcome::{Applied, Explanation, Outcome, OutcomeData};

use super::{create_commit_on_branch, GitOps, NewCommit, NO_CURRENT_BRANCH};

/// Upper bound on readiness passes when ordering imported commits.
const MAX_IMPORT_PASSES: usize = 1000;

/// Copy remote commits reachable from `remote_head` that are missing
/// locally, parents before children, onto the lane of `branch`.
///
/// Commits whose parents can never be satisfied are left out. Returns the
/// imported ids in insertion order.
fn import_remote_commits(state: &mut RepoState, remote_head: &CommitId, branch: &str) -> Vec<CommitId> {
    let mut local: HashSet<CommitId> = state.commits.iter().map(|c| c.id.clone()).collect();
    if local.contains(remote_head) {
        return vec![];
    }

    // Collect the missing part of the remote history.
    let mut pending: Vec<RemoteCommit> = Vec::new();
    let mut queued: HashSet<CommitId> = HashSet::new();
    let mut stack = vec![remote_head.clone()];
    while let Some(current) = stack.pop() {
        if local.contains(&current) || queued.contains(&current) {
            continue;
        }
        let Some(commit) = state.remote.commit(&current) else {
            continue;
        };
        queued.insert(current);
        stack.extend(commit.parents.iter().filter(|p| !local.contains(*p)).cloned());
        pending.push(commit.clone());
    }

    // Place commits once all their parents are present.
    let mut ordered: Vec<RemoteCommit> = Vec::with_capacity(pending.len());
    let mut passes = 0;
    while !pending.is_empty() && passes < MAX_IMPORT_PASSES {
        passes += 1;
        let before = pending.len();
        pending.retain(|commit| {
            let ready = commit.parents.iter().all(|p| local.contains(p));
            if ready {
                local.insert(commit.id.clone());
                ordered.push(commit.clone());
            }
            !ready
        });
        if pending.len() == before {
            break;
        }
    }
    if !pending.is_empty() {
        tracing::warn!(
            skipped = pending.len(),
            "remote commits with unresolvable parents were not imported"
        );
    }

    let row = state.branches.get(branch).map(|b| b.row).unwrap_or(0);
    let mut imported = Vec::with_capacity(ordered.len());
    for remote in ordered {
        let position = next_position(&state.commits, row);
        imported.push(remote.id.clone());
        state.commits.push(Commit {
            id: remote.id,
            message: remote.message,
            branch: branch.to_string(),
            parents: remote.parents,
            position,
            timestamp: remote.timestamp,
            is_merge: false,
            merge_source: None,
            is_remote: true,
            rebased_from: None,
        });
    }
    imported
}

impl GitOps {
    /// Record every remote branch head under `origin/<name>`.
    pub fn fetch(&mut self) -> Outcome {
        self.manager.mutate(|draft| {
            draft.remote_tracking = draft
                .remote
                .branches
                .values()
                .map(|b| (tracking_ref(&b.name), b.head.clone()))
                .collect();
            Applied::new(Explanation::Fetch, "git fetch origin").into()
        })
    }

    /// Publish the current branch to the remote.
    ///
    /// Rejected when the remote branch exists and its head is not an
    /// ancestor of the local head. A branch missing on the remote is created.
    pub fn push(&mut self) -> Outcome {
        self.manager.mutate(|draft| {
            let name = draft.current_branch.clone();
            let Some(local) = draft.current().cloned() else {
                return Outcome::abort(NO_CURRENT_BRANCH);
            };

            if let Some(remote) = draft.remote.branches.get(&name) {
                if !is_ancestor(&draft.commits, &remote.head, &local.head) {
                    return Outcome::abort("Push rejected: remote has diverged.");
                }
            }

            let reachable = collect_ancestors(&draft.commits, &local.head);
            let known: HashSet<CommitId> =
                draft.remote.commits.iter().map(|c| c.id.clone()).collect();
            let outgoing: Vec<RemoteCommit> = draft
                .commits
                .iter()
                .filter(|c| reachable.contains(&c.id) && !known.contains(&c.id))
                .map(RemoteCommit::from)
                .collect();
            tracing::debug!(branch = %name, commits = outgoing.len(), "pushing");
            draft.remote.commits.extend(outgoing);

            let row = draft.remote.branches.len() as u32;
            draft
                .remote
                .branches
                .entry(name.clone())
                .and_modify(|b| b.head = local.head.clone())
                .or_insert_with(|| RemoteBranch {
                    name: name.clone(),
                    head: local.head.clone(),
                    color: local.color.clone(),
                    row,
                });

            Applied::new(Explanation::Push, format!("git push origin {name}")).into()
        })
    }

    /// Bring the remote branch of the same name into the current branch.
    ///
    /// Missing remote commits are imported first. If the local head is then
    /// an ancestor of the remote head the branch fast-forwards; otherwise a
    /// merge commit joins the two heads.
    pub fn pull(&mut self) -> Outcome {
        self.manager.mutate(|draft| {
            let name = draft.current_branch.clone();
            let Some(local_head) = draft.head_of(&name).cloned() else {
                return Outcome::abort(NO_CURRENT_BRANCH);
            };
            let Some(remote_head) = draft.remote.branches.get(&name).map(|b| b.head.clone()) else {
                return Outcome::abort("Remote branch not found.");
            };

            let mut created = import_remote_commits(draft, &remote_head, &name);
            if !draft.contains(&remote_head) {
                return Outcome::abort("Remote history is incomplete.");
            }
            if local_head == remote_head {
                return Outcome::abort("Already up to date.");
            }

            let command = format!("git pull origin {name}");
            if is_ancestor(&draft.commits, &local_head, &remote_head) {
                if let Some(branch) = draft.branches.get_mut(&name) {
                    branch.head = remote_head;
                }
                return Applied::new(Explanation::Pull, command)
                    .with_data(OutcomeData::Pull { fast_forward: true })
                    .with_created(created)
                    .into();
            }

            let origin = tracking_ref(&name);
            let merge = create_commit_on_branch(
                draft,
                &name,
                NewCommit {
                    message: format!("Merge '{origin}' into '{name}'"),
                    parents: vec![local_head, remote_head],
                    merge_source: Some(origin),
                    rebased_from: None,
                },
            );
            created.push(merge);

            Applied::new(Explanation::Pull, command)
                .with_data(OutcomeData::Pull { fast_forward: false })
                .with_created(created)
                .into()
        })
    }

    /// Simulate another developer pushing a commit to the remote `main`.
    pub fn remote_commit(&mut self) -> Outcome {
        let message = self.settings.random_message();

        self.manager.mutate(|draft| {
            let Some(head) = draft.remote.branches.get(DEFAULT_BRANCH).map(|b| b.head.clone()) else {
                return Outcome::abort("Remote branch not found.");
            };

            let commit = RemoteCommit {
                id: CommitId::generate(),
                message,
                branch: DEFAULT_BRANCH.to_string(),
                parents: vec![head],
                timestamp: UtcTimestamp::now(),
            };
            let id = commit.id.clone();
            draft.remote.commits.push(commit);
            if let Some(branch) = draft.remote.branches.get_mut(DEFAULT_BRANCH) {
                branch.head = id;
            }

            Applied::new(Explanation::Fetch, "git commit (on remote)").into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verify::verify_state;
    use crate::engine::ops::OpSettings;

    fn ops() -> GitOps {
        GitOps::new(OpSettings::default())
    }

    fn remote_head(ops: &GitOps, branch: &str) -> Option<CommitId> {
        ops.snapshot().remote.branches.get(branch).map(|b| b.head.clone())
    }

    #[test]
    fn fetch_updates_tracking_only() {
        let mut ops = ops();
        ops.remote_commit();
        let before = ops.snapshot();

        ops.fetch();
        let after = ops.snapshot();

        assert_eq!(
            after.remote_tracking.get("origin/main"),
            remote_head(&ops, "main").as_ref()
        );
        assert_eq!(after.commits, before.commits);
        assert_eq!(after.branches, before.branches);
    }

    #[test]
    fn first_push_creates_remote_branch() {
        let mut ops = ops();
        ops.branch("feature");
        ops.commit(Some("work"));

        let outcome = ops.push();
        assert_eq!(outcome.applied().unwrap().command, "git push origin feature");

        let state = ops.snapshot();
        let head = state.head_of("feature").unwrap();
        assert_eq!(remote_head(&ops, "feature").as_ref(), Some(head));
        assert_eq!(state.remote.branches["feature"].row, 1);
        for id in collect_ancestors(&state.commits, head) {
            assert!(state.remote.contains(&id));
        }
        assert!(verify_state(&state).ok);
    }

    #[test]
    fn push_rejected_when_remote_diverged() {
        let mut ops = ops();
        ops.remote_commit();
        ops.commit(Some("local"));
        let before = ops.snapshot();

        assert_eq!(
            ops.push().error(),
            Some("Push rejected: remote has diverged.")
        );
        assert_eq!(ops.snapshot(), before);
    }

    #[test]
    fn pull_without_remote_branch_aborts() {
        let mut ops = ops();
        ops.branch("feature");
        let before = ops.snapshot();

        assert_eq!(ops.pull().error(), Some("Remote branch not found."));
        assert_eq!(ops.snapshot(), before);
    }

    #[test]
    fn pull_when_up_to_date_aborts() {
        let mut ops = ops();
        assert_eq!(ops.pull().error(), Some("Already up to date."));
    }

    #[test]
    fn pull_fast_forwards() {
        let mut ops = ops();
        ops.remote_commit();
        ops.remote_commit();
        let target = remote_head(&ops, "main").unwrap();

        let outcome = ops.pull();
        let applied = outcome.applied().unwrap();
        assert_eq!(applied.data, Some(OutcomeData::Pull { fast_forward: true }));
        assert_eq!(applied.created.len(), 2);

        let state = ops.snapshot();
        assert_eq!(state.head_of("main"), Some(&target));
        assert!(state.commits.iter().all(|c| !c.is_merge));
        assert!(state.commit(&target).unwrap().is_remote);
        assert!(verify_state(&state).ok);
    }

    #[test]
    fn pull_merges_when_diverged() {
        let mut ops = ops();
        ops.remote_commit();
        ops.commit(Some("local"));
        let local = ops.snapshot().head_of("main").cloned().unwrap();
        let remote = remote_head(&ops, "main").unwrap();

        ops.pull();
        let state = ops.snapshot();
        let merge = state.head_commit("main").unwrap();
        assert!(merge.is_merge);
        assert_eq!(merge.parents, vec![local, remote]);
        assert_eq!(merge.merge_source.as_deref(), Some("origin/main"));
        assert!(verify_state(&state).ok);

        // Now the remote head is an ancestor, so pushing succeeds
        assert!(ops.push().is_applied());
        assert_eq!(remote_head(&ops, "main"), ops.snapshot().head_of("main").cloned());
    }

    #[test]
    fn import_orders_parents_first() {
        let mut state = RepoState::initial(&["#fff".to_string()]);
        let root = state.commits[0].id.clone();
        let a = CommitId::new("aaaaaaa").unwrap();
        let b = CommitId::new("bbbbbbb").unwrap();
        let m = CommitId::new("ccccccc").unwrap();
        let remote = |id: &CommitId, parents: Vec<CommitId>| RemoteCommit {
            id: id.clone(),
            message: id.to_string(),
            branch: "main".into(),
            parents,
            timestamp: UtcTimestamp::now(),
        };
        // Deliberately stored child-first
        state.remote.commits.push(remote(&m, vec![a.clone(), b.clone()]));
        state.remote.commits.push(remote(&b, vec![root.clone()]));
        state.remote.commits.push(remote(&a, vec![root]));

        let imported = import_remote_commits(&mut state, &m, "main");

        assert_eq!(imported.len(), 3);
        assert_eq!(imported.last(), Some(&m));
        let local_ids: Vec<_> = state.commits.iter().map(|c| c.id.clone()).collect();
        let pos = |id: &CommitId| local_ids.iter().position(|x| x == id).unwrap();
        assert!(pos(&a) < pos(&m));
        assert!(pos(&b) < pos(&m));
    }

    #[test]
    fn import_skips_unresolvable_commits() {
        let mut state = RepoState::initial(&["#fff".to_string()]);
        let orphan = CommitId::new("ddddddd").unwrap();
        state.remote.commits.push(RemoteCommit {
            id: orphan.clone(),
            message: "orphan".into(),
            branch: "main".into(),
            parents: vec![CommitId::new("eeeeeee").unwrap()],
            timestamp: UtcTimestamp::now(),
        });

        let imported = import_remote_commits(&mut state, &orphan, "main");
        assert!(imported.is_empty());
        assert_eq!(state.commits.len(), 1);
    }

    #[test]
    fn remote_commit_touches_remote_only() {
        let mut ops = ops();
        let before = ops.snapshot();

        let outcome = ops.remote_commit();
        assert_eq!(outcome.applied().unwrap().explanation, Explanation::Fetch);

        let after = ops.snapshot();
        assert_eq!(after.commits, before.commits);
        assert_eq!(after.remote.commits.len(), 2);
        assert_ne!(remote_head(&ops, "main"), before.head_of("main").cloned());
    }
}
