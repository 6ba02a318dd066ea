//! cli::shell
//!
//! Line-oriented read/dispatch loop.
//!
//! Each input line is split into words, parsed as a [`ShellLine`], and
//! dispatched. Parse errors are printed and the loop continues; only
//! `quit` or end of input stops it.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::engine::Session;
use crate::ui::output::{self, Verbosity};

use super::args::{split_line, ShellLine};
use super::commands;

/// Whether the shell keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The interactive shell around one session.
#[derive(Debug)]
pub struct Shell {
    pub session: Session,
    pub verbosity: Verbosity,
    prompt: bool,
}

impl Shell {
    /// Shell over `session`, without a prompt.
    pub fn new(session: Session, verbosity: Verbosity) -> Self {
        Self {
            session,
            verbosity,
            prompt: false,
        }
    }

    /// Print a prompt before each line.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Read and handle lines until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if self.prompt {
                print!("gitsim({})> ", self.session.state().current_branch);
                std::io::stdout().flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            if self.handle_line(&line?)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Handle one line of input.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = match split_line(line) {
            Ok(words) => words,
            Err(e) => {
                output::error(e);
                return Ok(Flow::Continue);
            }
        };

        match ShellLine::try_parse_from(words) {
            Ok(parsed) => commands::dispatch(parsed.command, self),
            Err(e) => {
                // Help output is also reported as an error by clap
                if e.use_stderr() {
                    eprint!("{}", e.render());
                } else {
                    output::print(e.render(), self.verbosity);
                }
                Ok(Flow::Continue)
            }
        }
    }
}
