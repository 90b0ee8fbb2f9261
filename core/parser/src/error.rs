//! FILENAME: core/parser/src/error.rs
//! PURPOSE: Error types for the tokenizer and parser stages.

use crate::token::TokenKind;
use thiserror::Error;

/// Tokenizer failures. The token accumulator is always empty after one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character at offset {offset}.")]
    UnexpectedCharacter { offset: usize },

    #[error("Unexpected ')' without previous active scopes (unbalanced close bracket at offset {offset}).")]
    UnbalancedCloseBracket { offset: usize },
}

/// Parser failures with descriptive messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected '{found}', expected '{expected}'")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },

    #[error("Unexpected '{found}', expected an expression")]
    ExpectedExpression { found: TokenKind },

    #[error("Expected right side of the expression after '{operator}'")]
    MissingRightOperand { operator: TokenKind },

    #[error("Expected an operand after unary '{operator}', found '{found}'")]
    MissingUnaryOperand { operator: TokenKind, found: TokenKind },

    #[error("Empty expression inside brackets")]
    EmptyGroup,

    #[error("Empty expression before comma in block")]
    EmptyBeforeComma,

    #[error("Empty expression after comma in block expression")]
    EmptyAfterComma,

    #[error("Empty argument in call to '{name}'")]
    EmptyArgument { name: String },

    #[error("Tokens left on input at offset {offset} ('{found}'), missing bracket?")]
    TrailingTokens { offset: usize, found: TokenKind },

    #[error("Cell index too long: '{value}' (at most {max} digits)")]
    CellIndexTooLong { value: String, max: usize },

    #[error("Invalid cell index: '{0}'")]
    InvalidCellIndex(String),

    #[error("Invalid number literal: '{0}'")]
    InvalidNumber(String),

    #[error("Expression nested too deeply (at most {max} levels)")]
    NestingTooDeep { max: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;
