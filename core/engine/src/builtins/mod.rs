//! FILENAME: core/engine/src/builtins/mod.rs
//! PURPOSE: The built-in function library and its shared argument helpers.
//! CONTEXT: Operators in source text are lowered by the parser to the names defined
//! here (`+` is ADD, `&` is CONCAT, `$1` is GET_CELL). Each built-in evaluates its own
//! arguments through `eval_args`, so the first failing argument aborts the call.

mod cells;
mod io;
mod logic;
mod math;
mod text;

use crate::cell::{CellAddress, MAX_CELL_ADDRESS};
use crate::context::Context;
use crate::error::{EvalError, EvalResult};
use crate::function::{eval_args, BuiltinFunction};
use crate::value::Value;
use cell_parser::Expression;

/// Every built-in, in registration order.
pub fn all() -> Vec<BuiltinFunction> {
    vec![
        // Arithmetic
        BuiltinFunction::new("ADD", 2, math::add),
        BuiltinFunction::new("SUBTRACT", 2, math::subtract),
        BuiltinFunction::new("MULTIPLY", 2, math::multiply),
        BuiltinFunction::new("DIVIDE", 2, math::divide),
        BuiltinFunction::new("NEGATE", 1, math::negate),
        BuiltinFunction::new("ABS", 1, math::abs),
        // Comparison
        BuiltinFunction::new("LESS_THAN", 2, logic::less_than),
        BuiltinFunction::new("LESS_EQUAL", 2, logic::less_equal),
        BuiltinFunction::new("GREATER_THAN", 2, logic::greater_than),
        BuiltinFunction::new("GREATER_EQUAL", 2, logic::greater_equal),
        BuiltinFunction::new("EQUAL", 2, logic::equal),
        BuiltinFunction::new("NOT_EQUAL", 2, logic::not_equal),
        // Logical
        BuiltinFunction::variadic("AND", 1, logic::and),
        BuiltinFunction::variadic("OR", 1, logic::or),
        BuiltinFunction::new("NOT", 1, logic::not),
        // Text
        BuiltinFunction::variadic("CONCAT", 1, text::concat),
        BuiltinFunction::new("INSPECT", 1, text::inspect),
        // Cells
        BuiltinFunction::new("GET_CELL", 1, cells::get_cell),
        BuiltinFunction::new("GET_RANGE", 2, cells::get_range),
        BuiltinFunction::new("SET_CELL", 2, cells::set_cell),
        BuiltinFunction::new("SET_RANGE", 3, cells::set_range),
        BuiltinFunction::new("COPY_RANGE", 4, cells::copy_range),
        // I/O
        BuiltinFunction::variadic("PRINT", 1, io::print),
        BuiltinFunction::new("READ_LINE", 0, io::read_line),
    ]
}

/// Evaluates exactly `N` arguments.
pub(crate) fn eval_fixed<const N: usize>(
    name: &str,
    ctx: &Context,
    args: &[Expression],
) -> EvalResult<[Value; N]> {
    let values = eval_args(ctx, args)?;
    let found = values.len();
    values.try_into().map_err(|_| EvalError::ArityMismatch {
        name: name.to_string(),
        expected: N,
        found,
    })
}

/// Evaluates exactly `N` arguments that must all be numbers.
pub(crate) fn eval_numbers<const N: usize>(
    name: &str,
    ctx: &Context,
    args: &[Expression],
) -> EvalResult<[f64; N]> {
    let values = eval_fixed::<N>(name, ctx, args)?;
    let mut numbers = [0.0; N];
    for (slot, value) in numbers.iter_mut().zip(values.iter()) {
        *slot = expect_number(name, value)?;
    }
    Ok(numbers)
}

pub(crate) fn expect_number(name: &str, value: &Value) -> EvalResult<f64> {
    value.as_number().ok_or_else(|| EvalError::TypeMismatch {
        function: name.to_string(),
        expected: "number",
        found: value.type_name(),
    })
}

/// Truncates a number argument to a cell address.
pub(crate) fn expect_address(name: &str, value: &Value) -> EvalResult<CellAddress> {
    let n = expect_number(name, value)?;
    let truncated = n.trunc();
    if !truncated.is_finite() || truncated < 0.0 || truncated > MAX_CELL_ADDRESS as f64 {
        return Err(EvalError::InvalidCellAddress {
            function: name.to_string(),
            value: n,
        });
    }
    Ok(truncated as CellAddress)
}
