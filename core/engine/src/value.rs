//! FILENAME: core/engine/src/value.rs
//! PURPOSE: The dynamic value produced by evaluating an expression.
//! CONTEXT: A `Value` is a `CellValue` plus the transient `Range` shape returned by
//! GET_RANGE. Every built-in goes through the coercion helpers here so that
//! truthiness, number extraction and stringification stay consistent.

use crate::cell::{format_number, CellValue};
use crate::range::CellRange;

/// The result of evaluating an expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Range(CellRange),
}

impl Value {
    /// Returns the number held by this value. There is no implicit coercion:
    /// only `Number` yields `Some`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Empty, the empty string, zero and `false` are falsy. A range always covers
    /// at least one address and is truthy even when none of its cells are set.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Number(n) => *n == 0.0,
            Value::Text(s) => s.is_empty(),
            Value::Boolean(b) => !b,
            Value::Range(_) => false,
        }
    }

    pub fn is_truthy(&self) -> bool {
        !self.is_falsy()
    }

    /// Stringifies the value. Ranges concatenate their cells in address order.
    pub fn to_text(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Value::Range(range) => range.to_text(),
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Range(_) => "range",
        }
    }

    /// Converts the value for storage in a cell. Ranges cannot be stored.
    pub fn to_cell_value(&self) -> Option<CellValue> {
        match self {
            Value::Empty => Some(CellValue::Empty),
            Value::Number(n) => Some(CellValue::Number(*n)),
            Value::Text(s) => Some(CellValue::Text(s.clone())),
            Value::Boolean(b) => Some(CellValue::Boolean(*b)),
            Value::Range(_) => None,
        }
    }

    /// Falsy values collapse to `false`; used by EQUAL / NOT_EQUAL.
    pub(crate) fn normalized_for_equality(&self) -> Value {
        if self.is_falsy() {
            Value::Boolean(false)
        } else {
            self.clone()
        }
    }
}

impl From<CellValue> for Value {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Empty => Value::Empty,
            CellValue::Number(n) => Value::Number(n),
            CellValue::Text(s) => Value::Text(s),
            CellValue::Boolean(b) => Value::Boolean(b),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}
