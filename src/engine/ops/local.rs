//! Local history operations.

use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::core::graph::{collect_ancestors, first_parent_chain};
use crate::core::model::Branch;
use crate::core::naming::{validate_branch_name, NameCheck};
use crate::core::types::CommitId;
use crate::engine::outcome::{Applied, Explanation, Outcome, OutcomeData};

use super::{create_commit_on_branch, GitOps, NewCommit, NO_CURRENT_BRANCH};

/// Canned `(current, incoming)` snippets for the conflict demo.
pub const CONFLICT_EXAMPLES: [(&str, &str); 3] = [
    (
        "function greet(name) {\n  return \"Hello, \" + name;\n}",
        "function greet(name) {\n  return `Welcome, ${name}!`;\n}",
    ),
    (
        "const API_URL = \"http://localhost:3000\";",
        "const API_URL = \"https://api.example.com\";",
    ),
    (
        "button {\n  color: blue;\n  padding: 10px;\n}",
        "button {\n  color: green;\n  padding: 12px 20px;\n}",
    ),
];

/// A cosmetic merge conflict to show before merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictPreview {
    /// Branch being merged in.
    pub source: String,
    /// Checked-out branch receiving the merge.
    pub target: String,
    /// Snippet as it looks on `target`.
    pub current: String,
    /// Snippet as it looks on `source`.
    pub incoming: String,
}

impl GitOps {
    /// Commit on the current branch. A missing or blank message is replaced
    /// by a random one.
    pub fn commit(&mut self, message: Option<&str>) -> Outcome {
        let message = self.settings.message_or_random(message);

        self.manager.mutate(|draft| {
            let Some(head) = draft.current().map(|b| b.head.clone()) else {
                return Outcome::abort(NO_CURRENT_BRANCH);
            };
            let branch = draft.current_branch.clone();
            let command = format!("git commit -m \"{message}\"");
            let id = create_commit_on_branch(draft, &branch, NewCommit::on(head, message));

            Applied::new(Explanation::Commit, command)
                .with_created(vec![id])
                .into()
        })
    }

    /// Create a branch at the current head and switch to it.
    pub fn branch(&mut self, name: &str) -> Outcome {
        let settings = &self.settings;

        self.manager.mutate(|draft| {
            if let NameCheck::Invalid { reason } = validate_branch_name(name, &draft.branches) {
                return Outcome::abort(reason);
            }
            let Some(head) = draft.current().map(|b| b.head.clone()) else {
                return Outcome::abort(NO_CURRENT_BRANCH);
            };

            let row = draft.branches.len() as u32;
            draft.branches.insert(
                name.to_string(),
                Branch {
                    name: name.to_string(),
                    head: head.clone(),
                    color: settings.color_for_row(row),
                    row,
                    created_from: Some(draft.current_branch.clone()),
                    created_at: Some(head),
                },
            );
            draft.branch_counter += 1;
            draft.current_branch = name.to_string();

            Applied::new(Explanation::Branch, format!("git checkout -b {name}")).into()
        })
    }

    /// Switch to an existing branch.
    pub fn checkout(&mut self, name: &str) -> Outcome {
        self.manager.mutate(|draft| {
            if !draft.branches.contains_key(name) {
                return Outcome::abort("Branch does not exist.");
            }
            draft.current_branch = name.to_string();

            Applied::new(Explanation::Checkout, format!("git checkout {name}"))
                .with_data(OutcomeData::Checkout {
                    branch: name.to_string(),
                })
                .into()
        })
    }

    /// Merge `source` into the current branch with a two-parent commit.
    ///
    /// Always creates a merge commit, even when a fast-forward would do.
    pub fn merge(&mut self, source: &str) -> Outcome {
        self.merge_as(source, Explanation::Merge)
    }

    /// Show a canned conflict for merging `source`; does not touch state.
    ///
    /// # Errors
    ///
    /// Returns the same message [`GitOps::merge`] would abort with.
    pub fn preview_conflict(&self, source: &str) -> Result<ConflictPreview, String> {
        self.manager.with_state(|state| {
            if source == state.current_branch {
                return Err("Cannot merge a branch into itself.".to_string());
            }
            if !state.branches.contains_key(source) {
                return Err("Source branch does not exist.".to_string());
            }
            let (current, incoming) = CONFLICT_EXAMPLES
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or(CONFLICT_EXAMPLES[0]);
            Ok(ConflictPreview {
                source: source.to_string(),
                target: state.current_branch.clone(),
                current: current.to_string(),
                incoming: incoming.to_string(),
            })
        })
    }

    /// Finish a previewed conflict by performing the merge.
    pub fn resolve_conflict(&mut self, source: &str) -> Outcome {
        self.merge_as(source, Explanation::Conflict)
    }

    fn merge_as(&mut self, source: &str, explanation: Explanation) -> Outcome {
        self.manager.mutate(|draft| {
            let target = draft.current_branch.clone();
            if source == target {
                return Outcome::abort("Cannot merge a branch into itself.");
            }
            let Some(source_head) = draft.head_of(source).cloned() else {
                return Outcome::abort("Source branch does not exist.");
            };
            let Some(target_head) = draft.head_of(&target).cloned() else {
                return Outcome::abort(NO_CURRENT_BRANCH);
            };

            let id = create_commit_on_branch(
                draft,
                &target,
                NewCommit {
                    message: format!("Merge '{source}' into '{target}'"),
                    parents: vec![target_head, source_head],
                    merge_source: Some(source.to_string()),
                    rebased_from: None,
                },
            );

            Applied::new(explanation, format!("git merge {source}"))
                .with_data(OutcomeData::Merge {
                    source: source.to_string(),
                    target,
                })
                .with_created(vec![id])
                .into()
        })
    }

    /// Replay the current branch's own commits onto `target`.
    ///
    /// Walks the first-parent chain from the current head, keeps commits
    /// that were created on the current branch's lane and are not already
    /// reachable from the target head, and re-creates them oldest first on
    /// top of the target head. The originals stay in the graph.
    pub fn rebase(&mut self, target: &str) -> Outcome {
        self.manager.mutate(|draft| {
            let current = draft.current_branch.clone();
            if current == target {
                return Outcome::abort("Cannot rebase a branch onto itself.");
            }
            let Some(target_head) = draft.head_of(target).cloned() else {
                return Outcome::abort("Target branch does not exist.");
            };
            let Some(current_head) = draft.head_of(&current).cloned() else {
                return Outcome::abort(NO_CURRENT_BRANCH);
            };

            let onto = collect_ancestors(&draft.commits, &target_head);
            let mut replay: Vec<(CommitId, String)> = first_parent_chain(&draft.commits, &current_head)
                .into_iter()
                .filter(|c| !onto.contains(&c.id) && c.branch == current)
                .map(|c| (c.id.clone(), c.message.clone()))
                .collect();
            replay.reverse();

            if replay.is_empty() {
                return Outcome::abort("No commits to rebase.");
            }

            let mut parent = target_head;
            let mut created = Vec::with_capacity(replay.len());
            for (original, message) in replay {
                let id = create_commit_on_branch(
                    draft,
                    &current,
                    NewCommit {
                        message,
                        parents: vec![parent],
                        merge_source: None,
                        rebased_from: Some(original),
                    },
                );
                created.push(id.clone());
                parent = id;
            }

            Applied::new(Explanation::Rebase, format!("git rebase {target}"))
                .with_data(OutcomeData::Rebase {
                    target: target.to_string(),
                })
                .with_created(created)
                .into()
        })
    }

    /// Copy a single commit onto the current branch.
    ///
    /// Only the message is carried over; re-picking a commit whose change is
    /// already present still creates a new commit.
    pub fn cherry_pick(&mut self, commit_id: &str) -> Outcome {
        self.manager.mutate(|draft| {
            let Some(picked) = CommitId::new(commit_id)
                .ok()
                .and_then(|id| draft.commit(&id))
                .cloned()
            else {
                return Outcome::abort("Commit not found.");
            };
            let Some(head) = draft.current().map(|b| b.head.clone()) else {
                return Outcome::abort(NO_CURRENT_BRANCH);
            };

            let branch = draft.current_branch.clone();
            let id = create_commit_on_branch(
                draft,
                &branch,
                NewCommit::on(head, format!("Cherry-pick: {}", picked.message)),
            );

            Applied::new(Explanation::CherryPick, format!("git cherry-pick {}", picked.id))
                .with_created(vec![id])
                .into()
        })
    }
}
