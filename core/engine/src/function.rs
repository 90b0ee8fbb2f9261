//! FILENAME: core/engine/src/function.rs
//! PURPOSE: The callable capability that FunctionCall nodes dispatch to.
//! CONTEXT: Functions receive the context and their *unevaluated* argument
//! expressions, so each one decides what to evaluate (INSPECT evaluates nothing).
//! Built-ins wrap a plain fn pointer; hosts can implement `Function` themselves and
//! register the result on a context.

use crate::context::Context;
use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluate;
use crate::value::Value;
use cell_parser::Expression;

pub trait Function: Send + Sync {
    /// Name as registered; lookups are case-insensitive.
    fn name(&self) -> &str;

    /// Exact argument count, or the minimum when variadic.
    fn parameter_count(&self) -> usize;

    fn is_variadic(&self) -> bool;

    fn invoke(&self, ctx: &Context, args: &[Expression]) -> EvalResult<Value>;

    /// Validates an argument count against this function's signature.
    fn check_arity(&self, found: usize) -> EvalResult<()> {
        let expected = self.parameter_count();
        if self.is_variadic() {
            if found < expected {
                return Err(EvalError::TooFewArguments {
                    name: self.name().to_string(),
                    minimum: expected,
                    found,
                });
            }
        } else if found != expected {
            return Err(EvalError::ArityMismatch {
                name: self.name().to_string(),
                expected,
                found,
            });
        }
        Ok(())
    }
}

/// Signature of a native built-in.
pub type NativeFn = fn(&Context, &[Expression]) -> EvalResult<Value>;

/// A function backed by a native Rust callable.
#[derive(Clone)]
pub struct BuiltinFunction {
    name: String,
    parameter_count: usize,
    variadic: bool,
    func: NativeFn,
}

impl BuiltinFunction {
    pub fn new(name: impl Into<String>, parameter_count: usize, func: NativeFn) -> Self {
        BuiltinFunction {
            name: name.into(),
            parameter_count,
            variadic: false,
            func,
        }
    }

    /// A variadic function taking at least `minimum` arguments.
    pub fn variadic(name: impl Into<String>, minimum: usize, func: NativeFn) -> Self {
        BuiltinFunction {
            name: name.into(),
            parameter_count: minimum,
            variadic: true,
            func,
        }
    }
}

impl Function for BuiltinFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    fn is_variadic(&self) -> bool {
        self.variadic
    }

    fn invoke(&self, ctx: &Context, args: &[Expression]) -> EvalResult<Value> {
        (self.func)(ctx, args)
    }
}

impl std::fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<function:{}>", self.name)
    }
}

/// Evaluates every argument in order, stopping at the first error.
pub fn eval_args(ctx: &Context, args: &[Expression]) -> EvalResult<Vec<Value>> {
    args.iter().map(|arg| arg.evaluate(ctx)).collect()
}
