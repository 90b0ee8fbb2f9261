//! FILENAME: core/engine/src/builtins/math.rs
//! PURPOSE: Arithmetic built-ins. Operands must be numbers; nothing is coerced.

use super::eval_numbers;
use crate::context::Context;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use cell_parser::Expression;

pub(super) fn add(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_numbers("ADD", ctx, args)?;
    Ok(Value::Number(a + b))
}

pub(super) fn subtract(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_numbers("SUBTRACT", ctx, args)?;
    Ok(Value::Number(a - b))
}

pub(super) fn multiply(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_numbers("MULTIPLY", ctx, args)?;
    Ok(Value::Number(a * b))
}

pub(super) fn divide(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a, b] = eval_numbers("DIVIDE", ctx, args)?;
    if b == 0.0 {
        return Err(EvalError::DivisionByZero {
            function: "DIVIDE".to_string(),
            dividend: a,
        });
    }
    Ok(Value::Number(a / b))
}

pub(super) fn negate(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a] = eval_numbers("NEGATE", ctx, args)?;
    Ok(Value::Number(-a))
}

pub(super) fn abs(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let [a] = eval_numbers("ABS", ctx, args)?;
    Ok(Value::Number(a.abs()))
}
