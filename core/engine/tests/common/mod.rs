//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Cell engine integration tests.

#![allow(dead_code)]

use cell_engine::{Context, ContextStreams, Outcome, PipelineError, Session, Value};
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

/// A writer whose contents stay readable after it has been handed to a context.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Test harness wrapping a session with captured output and error streams.
pub struct TestHarness {
    pub session: Session,
    pub output: SharedBuffer,
    pub errors: SharedBuffer,
}

impl TestHarness {
    /// Create a harness with no input.
    pub fn new() -> Self {
        Self::with_input("")
    }

    /// Create a harness whose READ_LINE calls consume `input`.
    pub fn with_input(input: &str) -> Self {
        let output = SharedBuffer::default();
        let errors = SharedBuffer::default();
        let streams = ContextStreams::default()
            .input(Cursor::new(input.to_string()))
            .output(output.clone())
            .error(errors.clone());
        TestHarness {
            session: Session::with_context(Context::with_streams(streams)),
            output,
            errors,
        }
    }

    pub fn context(&self) -> &Context {
        self.session.context()
    }

    /// Run a complete single-line statement and return its value.
    pub fn eval(&mut self, line: &str) -> Result<Value, PipelineError> {
        match self.session.run_line(line)? {
            Outcome::Value(value) => Ok(value),
            other => panic!("'{}' did not produce a value: {:?}", line, other),
        }
    }

    /// Run a statement that must succeed.
    pub fn value(&mut self, line: &str) -> Value {
        match self.eval(line) {
            Ok(value) => value,
            Err(e) => panic!("'{}' failed: {}", line, e),
        }
    }

    /// Run a statement that must fail and return the error.
    pub fn error(&mut self, line: &str) -> PipelineError {
        match self.session.run_line(line) {
            Err(e) => e,
            Ok(outcome) => panic!("'{}' unexpectedly succeeded: {:?}", line, outcome),
        }
    }

    /// Feed several lines, returning the outcome of the last one.
    pub fn run_lines(&mut self, lines: &[&str]) -> Result<Outcome, PipelineError> {
        let mut last = Outcome::Empty;
        for line in lines {
            last = self.session.run_line(line)?;
        }
        Ok(last)
    }
}

/// Shorthand for a text value.
pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}
