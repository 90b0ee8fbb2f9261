//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates expression trees against a `Context`.
//! CONTEXT: The parser crate knows nothing about contexts, so evaluation is an
//! extension trait implemented here for `Expression`. Calls resolve their function
//! through the context (local table, then built-ins), check arity, and hand over the
//! unevaluated arguments. Evaluation never mutates the tree.

use crate::context::Context;
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use cell_parser::{Expression, Literal};
use log::trace;

pub trait Evaluate {
    fn evaluate(&self, ctx: &Context) -> EvalResult<Value>;
}

impl Evaluate for Literal {
    fn evaluate(&self, _ctx: &Context) -> EvalResult<Value> {
        Ok(match self {
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::Text(s.clone()),
        })
    }
}

impl Evaluate for Expression {
    fn evaluate(&self, ctx: &Context) -> EvalResult<Value> {
        match self {
            Expression::Literal(literal) => literal.evaluate(ctx),

            Expression::FunctionCall { name, args } => {
                let function = ctx
                    .lookup_function(name)
                    .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
                function.check_arity(args.len())?;
                trace!("EVAL {}({} arg(s))", function.name(), args.len());
                function.invoke(ctx, args)
            }

            Expression::Block(body) => {
                let mut last = Value::Empty;
                for expr in body {
                    last = expr.evaluate(ctx)?;
                }
                Ok(last)
            }
        }
    }
}
