//! log and status commands - read-only views of the repository

use crate::cli::shell::Shell;
use crate::core::graph::collect_ancestors;
use crate::core::model::tracking_ref;
use crate::ui::output;

/// Print commits newest first.
///
/// Without `all`, only commits reachable from the current head are shown.
pub fn log(shell: &Shell, all: bool) {
    let state = shell.session.state();
    let reachable = state
        .head_of(&state.current_branch)
        .map(|head| collect_ancestors(&state.commits, head));

    let lines: Vec<String> = state
        .commits
        .iter()
        .rev()
        .filter(|c| all || reachable.as_ref().is_some_and(|set| set.contains(&c.id)))
        .map(output::format_commit)
        .collect();

    if lines.is_empty() {
        output::print("No commits.", shell.verbosity);
        return;
    }
    output::print(lines.join("\n"), shell.verbosity);
}

/// Print branches, stash entries, remote tracking refs, and tutorial progress.
pub fn status(shell: &Shell) {
    let state = shell.session.state();
    let mut out = vec![format!("On branch {}", state.current_branch)];

    out.push(String::new());
    out.push("Branches:".to_string());
    for branch in state.branches.values() {
        out.push(output::format_branch(branch, branch.name == state.current_branch));
    }

    if !state.stash.is_empty() {
        out.push(String::new());
        out.push("Stash:".to_string());
        for (index, entry) in state.stash.iter().enumerate() {
            out.push(format!("  {}", output::format_stash(index, entry)));
        }
    }

    let tracking = tracking_ref(&state.current_branch);
    out.push(String::new());
    match (state.head_of(&state.current_branch), state.remote_tracking.get(&tracking)) {
        (Some(local), Some(remote)) if local == remote => {
            out.push(format!("Up to date with '{tracking}'."));
        }
        (Some(_), Some(remote)) => {
            out.push(format!("'{tracking}' was last seen at {remote}."));
        }
        _ => out.push(format!("No remote-tracking ref '{tracking}'.")),
    }

    let history = shell.session.history();
    output::debug(
        format!("history: {} past, {} undone", history.past_len(), history.future_len()),
        shell.verbosity,
    );

    if let Some(tutorial) = shell.session.tutorials().active() {
        out.push(format!(
            "Tutorial '{}': step {} of {}",
            tutorial.id,
            (shell.session.tutorials().step_index() + 1).min(tutorial.steps.len()),
            tutorial.steps.len()
        ));
    }

    output::print(out.join("\n"), shell.verbosity);
}
