//! FILENAME: core/parser/src/definitions.rs
//! PURPOSE: The ordered set of token matchers driven by the tokenizer.
//! CONTEXT: Each definition is an anchored regex plus two hooks: one that resolves the
//! concrete TokenKind from the matched text (operators, where one pattern covers many
//! kinds) and one that post-processes the text (quote removal, sigil stripping).
//!
//! ORDER MATTERS: the tokenizer takes the first definition with a non-empty match at the
//! current offset, so name/number/string must come before operator.

use crate::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// A single matcher in the tokenizer's definition list.
pub struct TokenDefinition {
    pattern: Regex,
    /// Matches are consumed but never produce a token (whitespace, comments).
    pub ignore: bool,
    pub default_kind: TokenKind,
    resolve_kind: fn(&str, TokenKind) -> TokenKind,
    post_process: fn(&str) -> String,
}

impl TokenDefinition {
    /// Builds a definition from an unanchored pattern; the pattern is anchored here.
    /// Panics on an invalid pattern, which only happens for the static table below.
    fn new(default_kind: TokenKind, pattern: &str, ignore: bool) -> Self {
        TokenDefinition {
            pattern: Regex::new(&format!("^(?:{})", pattern))
                .unwrap_or_else(|e| panic!("invalid token pattern {}: {}", pattern, e)),
            ignore,
            default_kind,
            resolve_kind: |_, default| default,
            post_process: |raw| raw.to_string(),
        }
    }

    fn with_resolver(mut self, resolve_kind: fn(&str, TokenKind) -> TokenKind) -> Self {
        self.resolve_kind = resolve_kind;
        self
    }

    fn with_post_process(mut self, post_process: fn(&str) -> String) -> Self {
        self.post_process = post_process;
        self
    }

    /// Returns the length in bytes of the match starting exactly at `offset`, or 0.
    pub fn match_len(&self, input: &str, offset: usize) -> usize {
        match input.get(offset..) {
            Some(rest) if !rest.is_empty() => self.pattern.find(rest).map_or(0, |m| m.end()),
            _ => 0,
        }
    }

    /// Converts the raw matched text into the token value.
    pub fn process(&self, raw: &str) -> String {
        (self.post_process)(raw)
    }

    /// Resolves the concrete kind for an already post-processed value.
    pub fn kind_for(&self, value: &str) -> TokenKind {
        (self.resolve_kind)(value, self.default_kind)
    }
}

/// The definitions in the order they are tried.
pub static DEFINITIONS: Lazy<Vec<TokenDefinition>> = Lazy::new(|| {
    vec![
        // Whitespace
        TokenDefinition::new(TokenKind::Unknown, r"\s+", true),
        // Line comment, runs to the end of the line
        TokenDefinition::new(TokenKind::Unknown, r"#[^\r\n]*", true),
        TokenDefinition::new(TokenKind::Name, r"[a-zA-Z_@][a-zA-Z0-9_@]*", false),
        TokenDefinition::new(
            TokenKind::Number,
            r"([0-9]+\.[0-9]+|[0-9]+|\.[0-9]+)([Ee][+-]?[0-9]+)?",
            false,
        ),
        TokenDefinition::new(
            TokenKind::String,
            r#""(?:""|[^"])*"|'(?:''|[^'])*'|`(?:``|[^`])*`"#,
            false,
        )
        .with_post_process(unquote),
        TokenDefinition::new(TokenKind::Cell, r"[$:][0-9]+", false)
            .with_post_process(|raw| raw[1..].to_string()),
        TokenDefinition::new(
            TokenKind::Unknown,
            r"<=|>=|!=|<>|==?|<|>|\+|-|\*|/|,|&|\(|\)",
            false,
        )
        .with_resolver(operator_kind),
    ]
});

/// Maps operator text to its kind.
fn operator_kind(value: &str, default: TokenKind) -> TokenKind {
    match value {
        "+" => TokenKind::Plus,
        "-" => TokenKind::Minus,
        "*" => TokenKind::Star,
        "/" => TokenKind::Slash,
        "<=" => TokenKind::LessEq,
        "<" => TokenKind::LessT,
        ">" => TokenKind::GreaterT,
        ">=" => TokenKind::GreaterEq,
        "=" | "==" => TokenKind::Equal,
        "<>" | "!=" => TokenKind::NotEqual,
        "," => TokenKind::Comma,
        "&" => TokenKind::Ampersand,
        "(" => TokenKind::BracketL,
        ")" => TokenKind::BracketR,
        _ => default,
    }
}

/// Removes the surrounding quotes and collapses the doubled quote character.
/// Only the quote that opened the literal is an escape; the other two are plain text.
fn unquote(raw: &str) -> String {
    let mut chars = raw.chars();
    let quote = match chars.next() {
        Some(q) => q,
        None => return String::new(),
    };
    let inner = &raw[quote.len_utf8()..raw.len() - quote.len_utf8()];
    let doubled: String = [quote, quote].iter().collect();
    inner.replace(&doubled, &quote.to_string())
}
