//! FILENAME: app/cell-repl/src/repl.rs
//! PURPOSE: The read-evaluate-print loop shared by every front end mode.
//! CONTEXT: Lines come from a caller-supplied reader so that interactive mode can read
//! stdin without holding its lock (READ_LINE reads stdin too). Errors are reported on
//! the context error stream; script mode stops at the first one.

use anyhow::{Context as _, Result};
use cell_engine::{Outcome, PipelineError, Session, Statement, Value};
use log::debug;
use std::io::Write;

pub const PROMPT: &str = "$$ ";
pub const CONTINUATION_PROMPT: &str = ".. ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Prompts, echoes each value and keeps going after errors.
    Interactive,
    /// Prints only the final value (every tree with `inspect`) and stops at the
    /// first error.
    Script,
}

pub struct Repl<W: Write> {
    session: Session,
    out: W,
    mode: Mode,
    inspect: bool,
}

impl<W: Write> Repl<W> {
    pub fn new(session: Session, out: W, mode: Mode, inspect: bool) -> Self {
        Repl {
            session,
            out,
            mode,
            inspect,
        }
    }

    /// Runs lines until `read_line` reports end of input.
    /// Returns `false` when a script stopped because of an error.
    pub fn run<F>(&mut self, mut read_line: F) -> Result<bool>
    where
        F: FnMut(&mut String) -> std::io::Result<usize>,
    {
        let mut last: Option<Value> = None;
        let mut buffer = String::new();

        loop {
            if self.mode == Mode::Interactive {
                let prompt = if self.session.is_continuing() {
                    CONTINUATION_PROMPT
                } else {
                    PROMPT
                };
                write!(self.out, "{}", prompt)?;
                self.out.flush()?;
            }

            buffer.clear();
            if read_line(&mut buffer).context("failed to read input")? == 0 {
                break;
            }
            let line = buffer.trim_end_matches(|c| c == '\n' || c == '\r');

            match self.step(line) {
                Ok(Some(value)) => {
                    if self.mode == Mode::Interactive || self.inspect {
                        self.show(&value)?;
                    } else {
                        last = Some(value);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    self.report(&e.to_string())?;
                    if self.mode == Mode::Script {
                        return Ok(false);
                    }
                }
            }
        }

        if self.mode == Mode::Interactive {
            writeln!(self.out)?;
            return Ok(true);
        }

        if self.session.is_continuing() {
            self.report("statement not closed at end of input (missing bracket?)")?;
            return Ok(false);
        }
        if let Some(value) = last {
            self.show(&value)?;
        }
        Ok(true)
    }

    /// Feeds one line. Yields a value once a statement completes; with `inspect`
    /// the value is the canonical text of the parsed tree.
    fn step(&mut self, line: &str) -> Result<Option<Value>, PipelineError> {
        if self.inspect {
            return Ok(match self.session.feed_line(line)? {
                Statement::Parsed(expr) => Some(Value::Text(expr.inspect())),
                Statement::NeedsMore | Statement::Empty => None,
            });
        }

        Ok(match self.session.run_line(line)? {
            Outcome::Value(value) => Some(value),
            Outcome::NeedsMore | Outcome::Empty => None,
        })
    }

    fn show(&mut self, value: &Value) -> Result<()> {
        if *value != Value::Empty {
            writeln!(self.out, "{}", value)?;
        }
        Ok(())
    }

    fn report(&mut self, message: &str) -> Result<()> {
        debug!("REPL reporting error: {}", message);
        let line = format!("error: {}", message);
        if !self.session.context().write_error(&line)? {
            eprintln!("{}", line);
        }
        Ok(())
    }
}
