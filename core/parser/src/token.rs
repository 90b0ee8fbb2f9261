//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the Cell tokenizer.
//! CONTEXT: Tokens are the atomic units produced by the tokenizer and consumed by the parser.
//! Every token keeps the text it was built from and the byte offset where it started,
//! so error messages can point back into the input line.

/// Kinds of tokens recognized by the tokenizer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Special
    EOF,
    Cell,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    LessEq,
    LessT,
    Equal,
    NotEqual,
    GreaterT,
    GreaterEq,
    Ampersand,

    // Delimiters
    BracketL,
    BracketR,
    Comma,

    // Literals
    Name,
    Number,
    String,

    Unknown,
}

impl TokenKind {
    /// Canonical textual form, used as the default token value and in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::EOF => "<eof>",
            TokenKind::Cell => "cell",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::LessEq => "<=",
            TokenKind::LessT => "<",
            TokenKind::Equal => "== or =",
            TokenKind::NotEqual => "!= or <>",
            TokenKind::GreaterT => ">",
            TokenKind::GreaterEq => ">=",
            TokenKind::Ampersand => "&",
            TokenKind::BracketL => "(",
            TokenKind::BracketR => ")",
            TokenKind::Comma => ",",
            TokenKind::Name => "name",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Unknown => "unknown",
        }
    }

    /// Returns true if this kind is one of `kinds`.
    pub fn is_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(self)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token: its kind, the (post-processed) text and the byte offset in the line.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub offset: usize,
}

impl Token {
    /// Creates a token. A missing value falls back to the kind's canonical form.
    pub fn new(kind: TokenKind, value: Option<String>, offset: usize) -> Self {
        Token {
            kind,
            value: value.unwrap_or_else(|| kind.as_str().to_string()),
            offset,
        }
    }

    /// Shorthand for tokens whose value is the kind's canonical form (brackets, commas).
    pub fn of_kind(kind: TokenKind, offset: usize) -> Self {
        Token::new(kind, None, offset)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.value)
    }
}
