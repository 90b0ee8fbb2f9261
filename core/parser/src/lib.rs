//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the Cell formula parser.
//! CONTEXT: This crate turns source lines into evaluatable expression trees.
//! Evaluation lives in the engine crate.
//!
//! PIPELINE: Line(s) --> Tokenizer --> Tokens --> Parser --> Expression tree
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, / and unary +/-
//! - Comparison: =, ==, !=, <>, <, >, <=, >=
//! - String concatenation: &
//! - Strings quoted with ", ' or ` (quote doubled to escape)
//! - Cell references: $12, :12 and ranges: $1:5
//! - Function calls: NAME(arg, ...), bare NAME
//! - Blocks: (a, b, c) evaluates in order and yields c
//! - Line comments starting with #
//! - Statements spanning several lines while brackets are open

pub mod ast;
pub mod definitions;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

#[cfg(test)]
mod tests;

pub use ast::{Expression, Literal};
pub use error::{LexError, ParseError, ParseResult};
pub use lexer::{scope_level, tokenize, Lexer, TokenizeStatus};
pub use parser::{parse, Parser, MAX_CELL_DIGITS, MAX_NESTING_DEPTH};
pub use token::{Token, TokenKind};
