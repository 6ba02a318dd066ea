//! Scenario tests for the git operations engine.
//!
//! Each test drives `GitOps` through a realistic sequence and checks the
//! resulting graph, then verifies structural invariants still hold.

use gitsim::core::graph::{collect_ancestors, is_ancestor};
use gitsim::core::model::RepoState;
use gitsim::core::verify::verify_state;
use gitsim::engine::{Explanation, GitOps, OpSettings, OutcomeData};

// =============================================================================
// Helpers
// =============================================================================

fn ops() -> GitOps {
    GitOps::new(OpSettings::default())
}

fn assert_valid(state: &RepoState) {
    let result = verify_state(state);
    assert!(result.ok, "invariants violated: {:?}", result.errors);
}

fn head(ops: &GitOps, branch: &str) -> gitsim::core::types::CommitId {
    ops.snapshot().head_of(branch).cloned().expect("branch exists")
}

// =============================================================================
// Local history
// =============================================================================

#[test]
fn feature_branch_then_merge() {
    let mut ops = ops();
    let root = head(&ops, "main");

    ops.branch("feature").into_result().unwrap();
    let state = ops.snapshot();
    assert_eq!(state.branches.len(), 2);
    assert_eq!(state.current_branch, "feature");
    assert_eq!(state.head_of("feature"), Some(&root));

    for i in 0..3 {
        ops.commit(Some(&format!("feature work {i}"))).into_result().unwrap();
    }
    let state = ops.snapshot();
    let feature_head = head(&ops, "feature");
    assert_eq!(collect_ancestors(&state.commits, &feature_head).len(), 4);

    ops.checkout("main").into_result().unwrap();
    assert_eq!(ops.snapshot().current_branch, "main");

    let applied = ops.merge("feature").into_result().unwrap();
    assert_eq!(applied.explanation, Explanation::Merge);
    assert_eq!(
        applied.data,
        Some(OutcomeData::Merge {
            source: "feature".into(),
            target: "main".into()
        })
    );

    let state = ops.snapshot();
    let merge = state.head_commit("main").unwrap();
    assert_eq!(merge.parents, vec![root, feature_head]);
    assert!(merge.is_merge);
    assert_eq!(merge.merge_source.as_deref(), Some("feature"));
    assert_eq!(applied.created, vec![merge.id.clone()]);
    assert_valid(&state);
}

#[test]
fn rejected_operations_leave_state_untouched() {
    let mut ops = ops();
    ops.branch("feature").into_result().unwrap();
    let before = ops.snapshot();

    let cases = [
        (ops.branch("feature"), "Branch already exists."),
        (ops.branch(""), "Branch name cannot be empty."),
        (ops.branch("-oops"), "Branch name cannot start with \"-\"."),
        (ops.checkout("nowhere"), "Branch does not exist."),
        (ops.merge("feature"), "Cannot merge a branch into itself."),
        (ops.merge("nowhere"), "Source branch does not exist."),
        (ops.rebase("feature"), "Cannot rebase a branch onto itself."),
        (ops.rebase("nowhere"), "Target branch does not exist."),
        (ops.cherry_pick("fffffff"), "Commit not found."),
        (ops.cherry_pick("not-a-hash"), "Commit not found."),
        (ops.stash_apply(false), "No stashes to apply."),
        (ops.stash_apply(true), "No stashes to apply."),
        (ops.stash_drop(), "No stashes to drop."),
    ];
    for (outcome, message) in cases {
        assert_eq!(outcome.error(), Some(message));
    }
    assert_eq!(ops.snapshot(), before);
}

#[test]
fn rebase_replays_branch_commits_in_order() {
    let mut ops = ops();
    ops.branch("refactor").into_result().unwrap();
    ops.commit(Some("one")).into_result().unwrap();
    ops.commit(Some("two")).into_result().unwrap();
    let originals: Vec<_> = ops.snapshot().commits_on("refactor").map(|c| c.id.clone()).collect();

    ops.checkout("main").into_result().unwrap();
    ops.commit(Some("main moves")).into_result().unwrap();
    let main_head = head(&ops, "main");

    ops.checkout("refactor").into_result().unwrap();
    let applied = ops.rebase("main").into_result().unwrap();
    assert_eq!(applied.created.len(), 2);

    let state = ops.snapshot();
    let first = state.commit(&applied.created[0]).unwrap();
    let second = state.commit(&applied.created[1]).unwrap();
    assert_eq!(first.parents, vec![main_head]);
    assert_eq!(first.message, "one");
    assert_eq!(first.rebased_from.as_ref(), Some(&originals[0]));
    assert_eq!(second.parents, vec![first.id.clone()]);
    assert_eq!(second.rebased_from.as_ref(), Some(&originals[1]));
    assert_eq!(state.head_of("refactor"), Some(&second.id));

    // Originals stay in the graph but no branch points at them
    for original in &originals {
        assert!(state.contains(original));
        assert!(state.branches.values().all(|b| &b.head != original));
    }
    assert_valid(&state);

    // A branch without commits of its own has nothing to replay
    ops.checkout("main").into_result().unwrap();
    ops.branch("empty").into_result().unwrap();
    assert_eq!(ops.rebase("refactor").error(), Some("No commits to rebase."));
}

#[test]
fn cherry_pick_copies_only_the_message() {
    let mut ops = ops();
    ops.branch("hotfix").into_result().unwrap();
    ops.commit(Some("prep")).into_result().unwrap();
    let fix = ops.commit(Some("fix crash")).into_result().unwrap().created[0].clone();

    ops.checkout("main").into_result().unwrap();
    let main_head = head(&ops, "main");
    let applied = ops.cherry_pick(fix.as_str()).into_result().unwrap();
    assert_eq!(applied.command, format!("git cherry-pick {fix}"));

    let state = ops.snapshot();
    let picked = state.head_commit("main").unwrap();
    assert_eq!(picked.message, "Cherry-pick: fix crash");
    assert_eq!(picked.parents, vec![main_head]);
    assert_ne!(picked.id, fix);
    assert_valid(&state);
}

#[test]
fn stash_round_trip() {
    let mut ops = ops();
    ops.stash_save(Some("half done")).into_result().unwrap();
    ops.stash_save(None).into_result().unwrap();

    let state = ops.snapshot();
    assert_eq!(state.stash[0].message, "WIP: work in progress");
    assert_eq!(state.stash[1].message, "half done");

    let applied = ops.stash_apply(false).into_result().unwrap();
    assert_eq!(applied.explanation, Explanation::StashApply);
    assert_eq!(ops.snapshot().stash.len(), 2);

    ops.stash_drop().into_result().unwrap();
    let applied = ops.stash_apply(true).into_result().unwrap();
    assert_eq!(applied.explanation, Explanation::StashPop);

    let state = ops.snapshot();
    assert!(state.stash.is_empty());
    assert_eq!(
        state.head_commit("main").unwrap().message,
        "WIP (stash): half done"
    );
    assert_valid(&state);
}

// =============================================================================
// Remote synchronization
// =============================================================================

#[test]
fn pull_without_remote_branch_aborts() {
    let mut ops = ops();
    ops.branch("local-only").into_result().unwrap();
    let before = ops.snapshot();

    assert_eq!(ops.pull().error(), Some("Remote branch not found."));
    assert_eq!(ops.snapshot(), before);
}

#[test]
fn pull_when_in_sync_is_already_up_to_date() {
    let mut ops = ops();
    assert_eq!(ops.pull().error(), Some("Already up to date."));
}

#[test]
fn pull_fast_forwards_onto_remote_work() {
    let mut ops = ops();
    let local_before = head(&ops, "main");
    ops.remote_commit().into_result().unwrap();
    let remote_head = ops.snapshot().remote.branches["main"].head.clone();

    let applied = ops.pull().into_result().unwrap();
    assert_eq!(applied.data, Some(OutcomeData::Pull { fast_forward: true }));
    assert_eq!(applied.created, vec![remote_head.clone()]);

    let state = ops.snapshot();
    assert_eq!(state.head_of("main"), Some(&remote_head));
    assert!(is_ancestor(&state.commits, &local_before, &remote_head));
    assert!(state.commit(&remote_head).unwrap().is_remote);
    assert!(state.commits.iter().all(|c| !c.is_merge));
    assert_valid(&state);
}

#[test]
fn pull_merges_diverged_histories() {
    let mut ops = ops();
    ops.remote_commit().into_result().unwrap();
    ops.commit(Some("local work")).into_result().unwrap();
    let local_head = head(&ops, "main");
    let remote_head = ops.snapshot().remote.branches["main"].head.clone();

    let applied = ops.pull().into_result().unwrap();
    assert_eq!(applied.data, Some(OutcomeData::Pull { fast_forward: false }));

    let state = ops.snapshot();
    let merge = state.head_commit("main").unwrap();
    assert_eq!(merge.parents, vec![local_head, remote_head]);
    assert_eq!(merge.merge_source.as_deref(), Some("origin/main"));
    assert_valid(&state);
}

#[test]
fn push_is_rejected_when_remote_diverged() {
    let mut ops = ops();
    ops.remote_commit().into_result().unwrap();
    ops.commit(Some("local work")).into_result().unwrap();
    let before = ops.snapshot();

    assert_eq!(ops.push().error(), Some("Push rejected: remote has diverged."));
    assert_eq!(ops.snapshot(), before);

    ops.pull().into_result().unwrap();
    ops.push().into_result().unwrap();
    let state = ops.snapshot();
    assert_eq!(state.remote.branches["main"].head, state.head_of("main").cloned().unwrap());
}

#[test]
fn push_publishes_every_ancestor() {
    let mut ops = ops();
    ops.branch("feature").into_result().unwrap();
    ops.commit(Some("a")).into_result().unwrap();
    ops.commit(Some("b")).into_result().unwrap();

    // First push of a new branch always succeeds
    ops.push().into_result().unwrap();

    let state = ops.snapshot();
    let local_head = state.head_of("feature").unwrap();
    assert_eq!(&state.remote.branches["feature"].head, local_head);
    for id in collect_ancestors(&state.commits, local_head) {
        assert!(state.remote.contains(&id), "{id} missing on remote");
    }
    assert_valid(&state);
}

#[test]
fn fetch_only_moves_tracking_refs() {
    let mut ops = ops();
    ops.remote_commit().into_result().unwrap();
    let before = ops.snapshot();

    ops.fetch().into_result().unwrap();
    let state = ops.snapshot();
    assert_eq!(state.commits, before.commits);
    assert_eq!(state.branches, before.branches);
    assert_eq!(
        state.remote_tracking.get("origin/main"),
        Some(&state.remote.branches["main"].head)
    );
}

#[test]
fn remote_commit_needs_remote_main() {
    let mut state = RepoState::initial(&["#fff".to_string()]);
    state.remote.branches.clear();
    let mut ops = GitOps::with_state(OpSettings::default(), state);
    assert_eq!(ops.remote_commit().error(), Some("Remote branch not found."));
}

// =============================================================================
// Conflict demo and reset
// =============================================================================

#[test]
fn conflict_preview_then_resolve() {
    let mut ops = ops();
    ops.branch("feature").into_result().unwrap();
    ops.commit(Some("theirs")).into_result().unwrap();
    ops.checkout("main").into_result().unwrap();
    let before = ops.snapshot();

    let preview = ops.preview_conflict("feature").unwrap();
    assert_eq!(preview.source, "feature");
    assert_eq!(preview.target, "main");
    assert_ne!(preview.current, preview.incoming);
    assert_eq!(ops.snapshot(), before);

    assert_eq!(
        ops.preview_conflict("main").unwrap_err(),
        "Cannot merge a branch into itself."
    );

    let applied = ops.resolve_conflict("feature").into_result().unwrap();
    assert_eq!(applied.explanation, Explanation::Conflict);
    assert!(ops.snapshot().head_commit("main").unwrap().is_merge);
}

#[test]
fn reset_starts_over() {
    let mut ops = ops();
    ops.branch("feature").into_result().unwrap();
    ops.stash_save(None).into_result().unwrap();

    let applied = ops.reset_all().into_result().unwrap();
    assert_eq!(applied.explanation, Explanation::Welcome);
    assert_eq!(applied.command, "git init");

    let state = ops.snapshot();
    assert_eq!(state.commits.len(), 1);
    assert_eq!(state.branches.len(), 1);
    assert!(state.stash.is_empty());
    assert_eq!(state.remote_tracking.len(), 1);
    assert_valid(&state);
}
