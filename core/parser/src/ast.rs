//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the expression tree produced by the parser.
//! CONTEXT: The tree is deliberately small. Operators and cell references do not get
//! their own node kinds; the parser lowers them to function calls (`1 + 2` becomes
//! `ADD(1, 2)`, `$3` becomes `GET_CELL(3)`), so evaluation only has to dispatch calls.
//!
//! NODE KINDS:
//! - Literal: a number or a string
//! - FunctionCall: a named call with ordered argument expressions
//! - Block: a comma-separated sequence, yielding the value of its last member
//!
//! `inspect()` renders a tree in canonical, re-parseable form.

/// Literal values that can appear in expressions.
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(f64),
    String(String),
}

/// A parsed expression. Immutable once built.
#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Literal(Literal),

    /// Every identifier is call syntax; a bare name is a call with no arguments.
    FunctionCall { name: String, args: Vec<Expression> },

    Block(Vec<Expression>),
}

impl Expression {
    pub fn number(n: f64) -> Self {
        Expression::Literal(Literal::Number(n))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(s.into()))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Canonical textual form, e.g. `ADD(1, MULTIPLY(2, 3))` for `1 + 2 * 3`.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Expression::Block(body) => {
                write!(f, "(")?;
                write_list(f, body)?;
                write!(f, ")")
            }
        }
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, items: &[Expression]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
