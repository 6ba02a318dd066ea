//! tutorial command - list, start, stop, and inspect guided exercises

use crate::cli::args::TutorialAction;
use crate::cli::shell::Shell;
use crate::ui::output;

/// Handle a `tutorial` subcommand.
pub fn tutorial(shell: &mut Shell, action: TutorialAction) {
    match action {
        TutorialAction::List => {
            let lines: Vec<String> = shell
                .session
                .tutorials()
                .tutorials()
                .iter()
                .map(|t| format!("{:<18} {} ({} steps)", t.id, t.title, t.steps.len()))
                .collect();
            output::print(output::format_list(&lines, "  "), shell.verbosity);
        }
        TutorialAction::Start { id } => match shell.session.start_tutorial(&id) {
            Ok(tutorial) => {
                output::print(format!("Started '{}'.", tutorial.title), shell.verbosity);
                if let Some(step) = tutorial.steps.first() {
                    output::print(format!("[tutorial] next: {}", step.description), shell.verbosity);
                }
            }
            Err(e) => output::rejected(e),
        },
        TutorialAction::Stop => {
            shell.session.stop_tutorial();
            output::print("Tutorial stopped.", shell.verbosity);
        }
        TutorialAction::Status => {
            let engine = shell.session.tutorials();
            let Some(active) = engine.active() else {
                output::print("No tutorial is active.", shell.verbosity);
                return;
            };
            let lines: Vec<String> = active
                .steps
                .iter()
                .enumerate()
                .map(|(i, step)| {
                    let mark = if i < engine.step_index() { "x" } else { " " };
                    format!("[{mark}] {}", step.description)
                })
                .collect();
            output::print(format!("{}\n{}", active.title, lines.join("\n")), shell.verbosity);
            if engine.is_complete() {
                output::print("[tutorial] complete!", shell.verbosity);
            }
        }
    }
}
