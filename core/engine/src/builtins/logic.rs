//! FILENAME: core/engine/src/builtins/logic.rs
//! PURPOSE: Comparison and logical built-ins.
//! CONTEXT: Relations compare numbers only. Equality never fails on types: falsy
//! values on either side collapse to `false` first, so `0 = ""` holds while
//! `1 = ""` does not.

use super::{eval_fixed, eval_numbers};
use crate::context::Context;
use crate::error::EvalResult;
use crate::function::eval_args;
use crate::value::Value;
use cell_parser::Expression;

pub(super) fn less_than(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_numbers("LESS_THAN", ctx, args)?;
    Ok(Value::Boolean(a < b))
}

pub(super) fn less_equal(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_numbers("LESS_EQUAL", ctx, args)?;
    Ok(Value::Boolean(a <= b))
}

pub(super) fn greater_than(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_numbers("GREATER_THAN", ctx, args)?;
    Ok(Value::Boolean(a > b))
}

pub(super) fn greater_equal(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_numbers("GREATER_EQUAL", ctx, args)?;
    Ok(Value::Boolean(a >= b))
}

fn values_equal(a: &Value, b: &Value) -> bool {
    a.normalized_for_equality() == b.normalized_for_equality()
}

pub(super) fn equal(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_fixed("EQUAL", ctx, args)?;
    Ok(Value::Boolean(values_equal(&a, &b)))
}

pub(super) fn not_equal(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_fixed("NOT_EQUAL", ctx, args)?;
    Ok(Value::Boolean(!values_equal(&a, &b)))
}

pub(super) fn and(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let values = eval_args(ctx, args)?;
    Ok(Value::Boolean(values.iter().all(Value::is_truthy)))
}

pub(super) fn or(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let values = eval_args(ctx, args)?;
    Ok(Value::Boolean(values.iter().any(Value::is_truthy)))
}

pub(super) fn not(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a] = eval_fixed("NOT", ctx, args)?;
    Ok(Value::Boolean(a.is_falsy()))
}
