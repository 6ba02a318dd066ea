//! ui::explain
//!
//! Short teaching notes shown after each applied operation.

use crate::engine::outcome::Explanation;

/// Headline and one-paragraph note for an explanation tag.
pub fn note(explanation: Explanation) -> (&'static str, &'static str) {
    match explanation {
        Explanation::Welcome => (
            "Welcome!",
            "Add commits with `commit`, start a feature with `branch <name>`, \
             and try `tutorial list` for guided workflows.",
        ),
        Explanation::Commit => (
            "Commit created.",
            "A commit is a snapshot that points back at its parent, so history forms a chain.",
        ),
        Explanation::Branch => (
            "Branch created.",
            "A branch is only a movable pointer to a commit; nothing is copied.",
        ),
        Explanation::Checkout => (
            "Switched branches.",
            "HEAD now follows the selected branch and new commits land there.",
        ),
        Explanation::Merge => (
            "Merge complete.",
            "The merge commit has two parents and joins the history of both branches.",
        ),
        Explanation::Conflict => (
            "Merge conflict resolved.",
            "Both sides changed the same lines, so one version had to be picked by hand.",
        ),
        Explanation::Rebase => (
            "Rebase complete.",
            "Your commits were replayed on top of the target as new commits with new ids. \
             Avoid rebasing commits others already have.",
        ),
        Explanation::CherryPick => (
            "Cherry-pick complete.",
            "One commit's change was copied onto this branch as a new commit.",
        ),
        Explanation::StashSave => (
            "Changes stashed.",
            "Stash entries form a stack; the newest is applied first.",
        ),
        Explanation::StashApply => (
            "Stash applied.",
            "The entry stays on the stack and can be applied again elsewhere.",
        ),
        Explanation::StashPop => (
            "Stash popped.",
            "Applied and removed from the stack in one step.",
        ),
        Explanation::StashDrop => (
            "Stash dropped.",
            "The top entry was discarded without being applied.",
        ),
        Explanation::Fetch => (
            "Remote updated.",
            "Fetching only moves remote-tracking refs like origin/main; local branches stay put.",
        ),
        Explanation::Push => (
            "Push complete.",
            "Your commits are now on the remote. A diverged remote must be pulled first.",
        ),
        Explanation::Pull => (
            "Pull complete.",
            "Pull is fetch plus merge: remote commits were brought in and joined with yours.",
        ),
        Explanation::Undo => (
            "Undo complete.",
            "The previous state is back. Real git reaches old states through the reflog.",
        ),
        Explanation::Redo => (
            "Redo complete.",
            "The undone state was restored.",
        ),
    }
}
