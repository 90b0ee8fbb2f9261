//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Drives the token definitions over an input line and accumulates tokens.
//! CONTEXT: This is the first stage of the pipeline. Unlike a one-shot lexer it is
//! incremental: tokens are appended to a caller-owned list across calls, and the running
//! bracket balance tells the caller whether the statement needs another line.
//!
//! RESULTS:
//! - Ok: the accumulated tokens form a complete statement
//! - NeedsMore: there are unclosed '(' and the caller must feed another line
//! - Err(LexError): the accumulator has been cleared

use crate::definitions::DEFINITIONS;
use crate::error::LexError;
use crate::token::{Token, TokenKind};
use log::debug;

/// Outcome of a successful tokenizer call.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenizeStatus {
    Ok,
    NeedsMore,
}

/// Counts the unmatched open brackets in a token list.
pub fn scope_level(tokens: &[Token]) -> i64 {
    tokens.iter().fold(0, |scope, token| match token.kind {
        TokenKind::BracketL => scope + 1,
        TokenKind::BracketR => scope - 1,
        _ => scope,
    })
}

/// Tokenizes `input`, appending to `tokens`.
///
/// The scope depth is recovered from what `tokens` already holds, so a statement can be
/// split over several lines by calling this repeatedly with the same list.
pub fn tokenize(input: &str, tokens: &mut Vec<Token>) -> Result<TokenizeStatus, LexError> {
    let mut offset = 0;
    let mut scope = scope_level(tokens);

    while offset < input.len() {
        let old_offset = offset;

        for def in DEFINITIONS.iter() {
            let len = def.match_len(input, offset);
            if len == 0 {
                continue;
            }

            if !def.ignore {
                let value = def.process(&input[offset..offset + len]);
                let kind = def.kind_for(&value);

                match kind {
                    TokenKind::BracketL => scope += 1,
                    TokenKind::BracketR => {
                        scope -= 1;
                        if scope < 0 {
                            tokens.clear();
                            debug!("LEXER unbalanced ')' at offset {}", offset);
                            return Err(LexError::UnbalancedCloseBracket { offset });
                        }
                    }
                    _ => {}
                }

                tokens.push(Token::new(kind, Some(value), offset));
            }

            offset += len;
            break;
        }

        if offset == old_offset {
            tokens.clear();
            debug!("LEXER no definition matches at offset {}", offset);
            return Err(LexError::UnexpectedCharacter { offset });
        }
    }

    if scope > 0 {
        debug!("LEXER {} open scope(s), statement continues", scope);
        Ok(TokenizeStatus::NeedsMore)
    } else {
        Ok(TokenizeStatus::Ok)
    }
}

/// Owns the token accumulator for one statement-in-progress.
/// Belongs to a single read loop; never share one across sessions.
#[derive(Debug, Default)]
pub struct Lexer {
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer { tokens: Vec::new() }
    }

    /// Feeds one more line of the current statement.
    pub fn feed(&mut self, line: &str) -> Result<TokenizeStatus, LexError> {
        tokenize(line, &mut self.tokens)
    }

    /// True while a previous line left brackets open.
    pub fn is_continuing(&self) -> bool {
        scope_level(&self.tokens) > 0
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Hands over the accumulated statement and starts a fresh one.
    pub fn take_tokens(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.tokens)
    }

    /// Drops whatever has been accumulated.
    pub fn reset(&mut self) {
        self.tokens.clear();
    }
}
