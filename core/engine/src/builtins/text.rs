//! FILENAME: core/engine/src/builtins/text.rs
//! PURPOSE: String built-ins.

use crate::context::Context;
use crate::error::{EvalError, EvalResult};
use crate::function::eval_args;
use crate::value::Value;
use cell_parser::Expression;

/// Joins the text form of every argument. Ranges contribute their cells in order.
pub(super) fn concat(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let values = eval_args(ctx, args)?;
    Ok(Value::Text(values.iter().map(Value::to_text).collect()))
}

/// Canonical source text of the argument, which is not evaluated.
pub(super) fn inspect(_ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    match args {
        [expr] => Ok(Value::Text(expr.inspect())),
        _ => Err(EvalError::ArityMismatch {
            name: "INSPECT".to_string(),
            expected: 1,
            found: args.len(),
        }),
    }
}
