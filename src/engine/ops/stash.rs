//! Stash operations.
//!
//! The stash is a LIFO list with the newest entry at index 0. Applying an
//! entry is modelled as a commit on the current branch.

use crate::core::model::StashEntry;
use crate::core::types::{CommitId, UtcTimestamp};
use crate::engine::outcome::{Applied, Explanation, Outcome};

use super::{create_commit_on_branch, GitOps, NewCommit, NO_CURRENT_BRANCH};

impl GitOps {
    /// Push a stash entry. A missing or blank message uses the configured default.
    pub fn stash_save(&mut self, message: Option<&str>) -> Outcome {
        let message = match message.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.settings.default_stash_message.clone(),
        };

        self.manager.mutate(|draft| {
            let command = format!("git stash push -m \"{message}\"");
            draft.stash.insert(
                0,
                StashEntry {
                    id: CommitId::generate(),
                    message,
                    created_at: UtcTimestamp::now(),
                },
            );
            Applied::new(Explanation::StashSave, command).into()
        })
    }

    /// Re-apply the newest stash entry as a commit; with `pop`, also remove it.
    pub fn stash_apply(&mut self, pop: bool) -> Outcome {
        self.manager.mutate(|draft| {
            let Some(entry) = draft.stash.first().cloned() else {
                return Outcome::abort("No stashes to apply.");
            };
            let Some(head) = draft.current().map(|b| b.head.clone()) else {
                return Outcome::abort(NO_CURRENT_BRANCH);
            };

            let branch = draft.current_branch.clone();
            let id = create_commit_on_branch(
                draft,
                &branch,
                NewCommit::on(head, format!("WIP (stash): {}", entry.message)),
            );
            if pop {
                draft.stash.remove(0);
            }

            let (explanation, command) = if pop {
                (Explanation::StashPop, "git stash pop")
            } else {
                (Explanation::StashApply, "git stash apply")
            };
            Applied::new(explanation, command).with_created(vec![id]).into()
        })
    }

    /// Discard the newest stash entry without applying it.
    pub fn stash_drop(&mut self) -> Outcome {
        self.manager.mutate(|draft| {
            if draft.stash.is_empty() {
                return Outcome::abort("No stashes to drop.");
            }
            draft.stash.remove(0);
            Applied::new(Explanation::StashDrop, "git stash drop").into()
        })
    }
}
