//! FILENAME: core/engine/src/builtins/cells.rs
//! PURPOSE: Cell and range accessors plus the mutation built-ins.
//! CONTEXT: Address arguments are numbers truncated toward zero and must land in
//! the 9-digit address space. Writes that would fill more than `MAX_RANGE_WRITE`
//! cells are refused; clearing any span is allowed.

use super::{eval_fixed, expect_address};
use crate::cell::{CellValue, MAX_RANGE_WRITE};
use crate::context::Context;
use crate::error::{EvalError, EvalResult};
use crate::range::span_len;
use crate::value::Value;
use cell_parser::Expression;

fn storable(name: &str, value: &Value) -> EvalResult<CellValue> {
    value.to_cell_value().ok_or_else(|| EvalError::RangeNotStorable {
        function: name.to_string(),
    })
}

fn too_large(name: &str, cells: u64) -> EvalError {
    EvalError::RangeTooLarge {
        function: name.to_string(),
        cells,
        max: MAX_RANGE_WRITE,
    }
}

pub(super) fn get_cell(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [addr] = eval_fixed("GET_CELL", ctx, args)?;
    let addr = expect_address("GET_CELL", &addr)?;
    Ok(ctx.get(addr).into())
}

pub(super) fn get_range(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [start, end] = eval_fixed("GET_RANGE", ctx, args)?;
    let start = expect_address("GET_RANGE", &start)?;
    let end = expect_address("GET_RANGE", &end)?;
    Ok(Value::Range(ctx.get_range(start, end)))
}

pub(super) fn set_cell(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [addr, value] = eval_fixed("SET_CELL", ctx, args)?;
    let addr = expect_address("SET_CELL", &addr)?;
    ctx.set(addr, storable("SET_CELL", &value)?);
    Ok(value)
}

pub(super) fn set_range(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [start, end, value] = eval_fixed("SET_RANGE", ctx, args)?;
    let start = expect_address("SET_RANGE", &start)?;
    let end = expect_address("SET_RANGE", &end)?;
    let cell = storable("SET_RANGE", &value)?;
    let cells = span_len(start, end);
    if !cell.is_empty() && cells > MAX_RANGE_WRITE {
        return Err(too_large("SET_RANGE", cells));
    }
    ctx.set_range(start, end, cell);
    Ok(value)
}

pub(super) fn copy_range(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let values = eval_fixed::<4>("COPY_RANGE", ctx, args)?;
    let mut addrs = [0; 4];
    for (slot, value) in addrs.iter_mut().zip(values.iter()) {
        *slot = expect_address("COPY_RANGE", value)?;
    }
    let [src_start, src_end, dst_start, dst_end] = addrs;
    ctx.copy_range_limited(src_start, src_end, dst_start, dst_end, MAX_RANGE_WRITE)
        .map_err(|cells| too_large("COPY_RANGE", cells))?;
    Ok(Value::Empty)
}
