//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines what a single memory cell can hold.
//! CONTEXT: Cells are addressed by a flat non-negative integer. A cell holds one of
//! four plain values; ranges only exist transiently during evaluation and are never
//! stored. Unset cells read as `Empty`.

use serde::{Deserialize, Serialize};

/// Flat cell address. Fits the 9-digit textual form (`$123456789`).
pub type CellAddress = u32;

/// Highest address reachable from source text.
pub const MAX_CELL_ADDRESS: CellAddress = 999_999_999;

/// Most cells a single SET_RANGE or COPY_RANGE may fill with values.
/// Clearing a range is not limited.
pub const MAX_RANGE_WRITE: u64 = 1_000_000;

/// The value stored in a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the display value of the cell as a String.
    /// Empty cells display as the empty string.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Formats a number without unnecessary decimal places (`2`, `2.5`).
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}
