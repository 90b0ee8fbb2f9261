//! FILENAME: core/engine/src/builtins/io.rs
//! PURPOSE: Built-ins that talk to the context streams.

use crate::context::Context;
use crate::error::{EvalError, EvalResult};
use crate::function::eval_args;
use crate::value::Value;
use cell_parser::Expression;

/// Writes the joined text of the arguments plus a newline and yields the text.
/// Without an output stream nothing is written.
pub(super) fn print(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    let values = eval_args(ctx, args)?;
    let text: String = values.iter().map(Value::to_text).collect();
    ctx.write_output(&format!("{}\n", text))?;
    Ok(Value::Text(text))
}

pub(super) fn read_line(ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
    if !args.is_empty() {
        return Err(EvalError::ArityMismatch {
            name: "READ_LINE".to_string(),
            expected: 0,
            found: args.len(),
        });
    }
    Ok(ctx.read_line()?.map_or(Value::Empty, Value::Text))
}
