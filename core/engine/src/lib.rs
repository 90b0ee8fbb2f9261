//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the Cell evaluation engine.
//! CONTEXT: Evaluates trees produced by `cell-parser` against a `Context` of numbered
//! cells and functions. `Session` wires tokenizer, parser and evaluator together for
//! line-oriented front ends.

pub mod builtins;
pub mod cell;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod function;
pub mod range;
pub mod registry;
pub mod session;
pub mod value;

// Re-export commonly used types at the crate root
pub use cell::{CellAddress, CellValue, MAX_CELL_ADDRESS, MAX_RANGE_WRITE};
pub use context::{Context, ContextStreams, InputStream};
pub use error::{EvalError, EvalResult, PipelineError};
pub use evaluator::Evaluate;
pub use function::{eval_args, BuiltinFunction, Function, NativeFn};
pub use range::CellRange;
pub use session::{Outcome, Session, Statement};
pub use value::Value;

pub use cell_parser::{Expression, Literal};
