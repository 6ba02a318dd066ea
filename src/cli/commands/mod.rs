//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Turns the parsed command into a session call
//! 2. Prints the report
//! 3. Saves the state after an applied change, if a store is configured
//!
//! Handlers do NOT touch repository state directly.

mod log_cmd;
mod tutorial;

pub use log_cmd::{log, status};
pub use tutorial::tutorial;

use anyhow::Result;

use crate::engine::{Explanation, Outcome, SessionError, SessionReport};
use crate::tutorial::StepAdvance;
use crate::ui::explain;
use crate::ui::output;

use super::args::ShellCommand;
use super::shell::{Flow, Shell};

/// Dispatch a command to its handler.
pub fn dispatch(command: ShellCommand, shell: &mut Shell) -> Result<Flow> {
    if let Some(intent) = command.intent() {
        let report = shell.session.execute(intent);
        print_report(shell, &report);
        if report.outcome.is_applied() {
            autosave(shell);
        }
        return Ok(Flow::Continue);
    }

    match command {
        ShellCommand::Conflict { source } => conflict(shell, &source),
        ShellCommand::Log { all } => log_cmd::log(shell, all),
        ShellCommand::Status => log_cmd::status(shell),
        ShellCommand::Tutorial { action } => tutorial::tutorial(shell, action),
        ShellCommand::Save => save(shell),
        ShellCommand::Quit => return Ok(Flow::Exit),
        other => {
            tracing::debug!(?other, "command without intent reached the fallback");
        }
    }
    Ok(Flow::Continue)
}

/// Print the greeting shown for a fresh repository.
pub fn print_welcome(shell: &Shell) {
    print_note(shell, Explanation::Welcome, "git init");
}

fn print_report(shell: &Shell, report: &SessionReport) {
    match &report.outcome {
        Outcome::Abort { error, .. } => output::rejected(error),
        Outcome::Applied(applied) => {
            print_note(shell, applied.explanation, &applied.command);
            if !applied.created.is_empty() {
                let ids: Vec<_> = applied.created.iter().map(|id| id.as_str()).collect();
                output::debug(format!("created {}", ids.join(" ")), shell.verbosity);
            }
        }
    }

    if let Some(advance) = &report.tutorial {
        print_advance(shell, advance);
    }
}

fn print_note(shell: &Shell, explanation: Explanation, command: &str) {
    let (headline, body) = explain::note(explanation);
    output::print(format!("$ {command}"), shell.verbosity);
    output::print(format!("{headline} {body}"), shell.verbosity);
}

fn print_advance(shell: &Shell, advance: &StepAdvance) {
    output::print(
        format!("[tutorial] done: {}", advance.completed.description),
        shell.verbosity,
    );
    match advance.next {
        Some(next) => output::print(format!("[tutorial] next: {}", next.description), shell.verbosity),
        None => output::print("[tutorial] complete!", shell.verbosity),
    }
}

fn autosave(shell: &Shell) {
    match shell.session.save() {
        Ok(()) | Err(SessionError::NoStore) => {}
        Err(e) => output::error(format!("could not save state: {e}")),
    }
}

fn conflict(shell: &Shell, source: &str) {
    match shell.session.preview_conflict(source) {
        Ok(preview) => {
            let text = format!(
                "CONFLICT (content): merging '{}' into '{}'\n<<<<<<< {}\n{}\n=======\n{}\n>>>>>>> {}\n\
                 Run `resolve {}` to finish the merge.",
                preview.source,
                preview.target,
                preview.target,
                preview.current,
                preview.incoming,
                preview.source,
                preview.source,
            );
            output::print(text, shell.verbosity);
        }
        Err(error) => output::rejected(error),
    }
}

fn save(shell: &Shell) {
    match shell.session.save() {
        Ok(()) => {
            if let Some(store) = shell.session.store() {
                output::print(format!("Saved to {}", store.path().display()), shell.verbosity);
            }
        }
        Err(SessionError::NoStore) => {
            output::error("no state file configured; start gitsim with --state <file>")
        }
        Err(e) => output::error(e),
    }
}
