//! tutorial::catalog
//!
//! Built-in tutorials and the predicates that complete their steps.

use serde::Serialize;

use crate::core::model::{RepoState, DEFAULT_BRANCH};
use crate::core::types::CommitId;

use super::checks::PredicateRegistry;

/// One step of a tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub id: &'static str,
    pub description: &'static str,
}

/// A named, ordered sequence of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tutorial {
    pub id: &'static str,
    pub title: &'static str,
    pub steps: &'static [Step],
}

const fn step(id: &'static str, description: &'static str) -> Step {
    Step { id, description }
}

/// Every tutorial shipped with the simulator.
pub static TUTORIALS: &[Tutorial] = &[
    Tutorial {
        id: "feature-flow",
        title: "Feature Branch Flow",
        steps: &[
            step("create-feature", "Create a branch named \"feature\"."),
            step("feature-commits", "Make 3 commits on \"feature\"."),
            step("checkout-main", "Switch back to \"main\"."),
            step("merge-feature", "Merge \"feature\" into \"main\"."),
        ],
    },
    Tutorial {
        id: "rebase-flow",
        title: "Rebase Practice",
        steps: &[
            step("create-refactor", "Create a branch named \"refactor\"."),
            step("refactor-commits", "Make 2 commits on \"refactor\"."),
            step("checkout-main-again", "Switch back to \"main\"."),
            step("main-commit", "Make 1 commit on \"main\"."),
            step("rebase-refactor", "Switch to \"refactor\" and rebase onto \"main\"."),
        ],
    },
    Tutorial {
        id: "cherry-pick-flow",
        title: "Cherry-pick a Hotfix",
        steps: &[
            step("cp-create-hotfix", "Create a branch named \"hotfix\"."),
            step("cp-hotfix-commits", "Make 2 commits on \"hotfix\"."),
            step("cp-checkout-main", "Switch back to \"main\"."),
            step("cp-cherry-pick", "Cherry-pick a commit from \"hotfix\" onto \"main\"."),
        ],
    },
    Tutorial {
        id: "stash-flow",
        title: "Stash Workflow",
        steps: &[
            step("st-commit-first", "Make a commit on \"main\"."),
            step("st-stash-save", "Save changes to the stash."),
            step("st-create-bugfix", "Create a branch named \"bugfix\"."),
            step("st-bugfix-commit", "Make a commit on \"bugfix\"."),
            step("st-checkout-main-back", "Switch back to \"main\"."),
            step("st-stash-pop", "Pop the stash to restore your saved work."),
        ],
    },
    Tutorial {
        id: "remote-collab",
        title: "Remote Collaboration",
        steps: &[
            step("rc-push-main", "Push \"main\" to the remote."),
            step("rc-simulate-remote", "Simulate a remote commit (another developer pushes)."),
            step("rc-pull-changes", "Pull remote changes into \"main\"."),
            step("rc-local-commit", "Make a local commit on \"main\"."),
            step("rc-push-again", "Push your new commit to the remote."),
        ],
    },
];

/// Look up a built-in tutorial.
pub fn find(id: &str) -> Option<&'static Tutorial> {
    TUTORIALS.iter().find(|t| t.id == id)
}

fn has_branch(state: &RepoState, name: &str) -> bool {
    state.branches.contains_key(name)
}

fn lane_count(state: &RepoState, name: &str) -> usize {
    state.commits_on(name).count()
}

fn on_branch(state: &RepoState, name: &str) -> bool {
    state.current_branch == name
}

fn lane_has_message_prefix(state: &RepoState, lane: &str, prefix: &str) -> bool {
    state
        .commits_on(lane)
        .any(|c| c.message.starts_with(prefix))
}

/// Local and remote `main` heads, when both exist.
fn main_heads(state: &RepoState) -> Option<(&CommitId, &CommitId)> {
    let local = state.head_of(DEFAULT_BRANCH)?;
    let remote = state.remote.branches.get(DEFAULT_BRANCH).map(|b| &b.head)?;
    Some((local, remote))
}

fn main_in_sync(state: &RepoState) -> bool {
    main_heads(state).is_some_and(|(local, remote)| local == remote)
}

fn main_out_of_sync(state: &RepoState) -> bool {
    main_heads(state).is_some_and(|(local, remote)| local != remote)
}

/// Predicates for every built-in step.
pub fn builtin_checks() -> PredicateRegistry {
    let mut checks = PredicateRegistry::new();

    checks.register("feature-flow", "create-feature", |s| has_branch(s, "feature"));
    checks.register("feature-flow", "feature-commits", |s| lane_count(s, "feature") >= 3);
    checks.register("feature-flow", "checkout-main", |s| on_branch(s, "main"));
    checks.register("feature-flow", "merge-feature", |s| {
        s.head_commit("main")
            .is_some_and(|c| c.is_merge && c.merge_source.as_deref() == Some("feature"))
    });

    checks.register("rebase-flow", "create-refactor", |s| has_branch(s, "refactor"));
    checks.register("rebase-flow", "refactor-commits", |s| lane_count(s, "refactor") >= 2);
    checks.register("rebase-flow", "checkout-main-again", |s| on_branch(s, "main"));
    checks.register("rebase-flow", "main-commit", |s| lane_count(s, "main") >= 2);
    checks.register("rebase-flow", "rebase-refactor", |s| {
        s.commits_on("refactor").any(|c| c.rebased_from.is_some())
    });

    checks.register("cherry-pick-flow", "cp-create-hotfix", |s| has_branch(s, "hotfix"));
    checks.register("cherry-pick-flow", "cp-hotfix-commits", |s| lane_count(s, "hotfix") >= 2);
    checks.register("cherry-pick-flow", "cp-checkout-main", |s| on_branch(s, "main"));
    checks.register("cherry-pick-flow", "cp-cherry-pick", |s| {
        lane_has_message_prefix(s, "main", "Cherry-pick:")
    });

    checks.register("stash-flow", "st-commit-first", |s| lane_count(s, "main") >= 2);
    checks.register("stash-flow", "st-stash-save", |s| !s.stash.is_empty());
    checks.register("stash-flow", "st-create-bugfix", |s| has_branch(s, "bugfix"));
    checks.register("stash-flow", "st-bugfix-commit", |s| lane_count(s, "bugfix") >= 1);
    checks.register("stash-flow", "st-checkout-main-back", |s| on_branch(s, "main"));
    checks.register("stash-flow", "st-stash-pop", |s| {
        s.stash.is_empty() && lane_has_message_prefix(s, "main", "WIP (stash):")
    });

    checks.register("remote-collab", "rc-push-main", main_in_sync);
    checks.register("remote-collab", "rc-simulate-remote", main_out_of_sync);
    checks.register("remote-collab", "rc-pull-changes", |s| {
        main_heads(s).is_some_and(|(_, remote)| s.contains(remote))
    });
    checks.register("remote-collab", "rc-local-commit", main_out_of_sync);
    checks.register("remote-collab", "rc-push-again", main_in_sync);

    checks
}
