//! FILENAME: core/engine/src/session.rs
//! PURPOSE: Drives the full pipeline (tokenize, parse, evaluate) one line at a time.
//! CONTEXT: A session owns one `Context` and the tokenizer state of the statement
//! being typed. Front ends feed it raw lines and act on the outcome; a line that
//! leaves brackets open yields `NeedsMore` until the statement is closed.

use crate::context::Context;
use crate::error::PipelineError;
use crate::evaluator::Evaluate;
use crate::value::Value;
use cell_parser::{parse, Expression, Lexer, TokenizeStatus};

/// Result of feeding a line to the tokenizer and parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Brackets are still open; feed another line.
    NeedsMore,
    /// The statement held no tokens (blank line or comment).
    Empty,
    Parsed(Expression),
}

/// Result of running a line through the whole pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NeedsMore,
    Empty,
    Value(Value),
}

#[derive(Debug, Default)]
pub struct Session {
    context: Context,
    lexer: Lexer,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_context(context: Context) -> Self {
        Session {
            context,
            lexer: Lexer::new(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// True while the statement being accumulated has open brackets.
    pub fn is_continuing(&self) -> bool {
        self.lexer.is_continuing()
    }

    /// Drops any partially typed statement.
    pub fn reset(&mut self) {
        self.lexer.reset();
    }

    /// Tokenizes a line and, once the statement is complete, parses it.
    /// On any error the partial statement is discarded.
    pub fn feed_line(&mut self, line: &str) -> Result<Statement, PipelineError> {
        if self.lexer.feed(line)? == TokenizeStatus::NeedsMore {
            return Ok(Statement::NeedsMore);
        }

        let tokens = self.lexer.take_tokens();
        Ok(match parse(&tokens)? {
            Some(expr) => Statement::Parsed(expr),
            None => Statement::Empty,
        })
    }

    /// Feeds a line and evaluates the statement once it is complete.
    pub fn run_line(&mut self, line: &str) -> Result<Outcome, PipelineError> {
        match self.feed_line(line)? {
            Statement::NeedsMore => Ok(Outcome::NeedsMore),
            Statement::Empty => Ok(Outcome::Empty),
            Statement::Parsed(expr) => Ok(Outcome::Value(self.evaluate(&expr)?)),
        }
    }

    pub fn evaluate(&self, expr: &Expression) -> Result<Value, PipelineError> {
        Ok(expr.evaluate(&self.context)?)
    }
}
