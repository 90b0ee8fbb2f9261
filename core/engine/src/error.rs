//! FILENAME: core/engine/src/error.rs
//! PURPOSE: Error types for evaluation and for the whole line pipeline.

use cell_parser::{LexError, ParseError};
use thiserror::Error;

/// Evaluation failures. The first error aborts the surrounding call or block.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("'{0}' is not a function")]
    UnknownFunction(String),

    #[error("{name}: argument count differs from parameter count (expected {expected}, got {found})")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{name}: function requires at least {minimum} argument(s), got {found}")]
    TooFewArguments {
        name: String,
        minimum: usize,
        found: usize,
    },

    #[error("{function}: expected {expected}, got {found}")]
    TypeMismatch {
        function: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{function}: division by zero ({dividend} / 0)")]
    DivisionByZero { function: String, dividend: f64 },

    #[error("{function}: invalid cell address {value}")]
    InvalidCellAddress { function: String, value: f64 },

    #[error("{function}: a range cannot be stored in a cell")]
    RangeNotStorable { function: String },

    #[error("{function}: cannot fill {cells} cells at once (at most {max})")]
    RangeTooLarge { function: String, cells: u64, max: u64 },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EvalError {
    fn from(e: std::io::Error) -> Self {
        EvalError::Io(e.to_string())
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Any failure from tokenizing, parsing or evaluating a line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Tokenizer error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}
