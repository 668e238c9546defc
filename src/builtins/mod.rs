// ABOUTME: Dispatch table and shared helpers for the strict (eagerly-evaluated) primitives

mod arithmetic;
mod comparison;
mod lists;
mod logic;
mod predicates;

use crate::error::LispError;
use crate::value::{Builtin, Value};

/// Applies an already-resolved strict primitive to its (already evaluated)
/// arguments. Special forms never reach this function; they are handled
/// directly in the evaluator since they need the raw operand list and the
/// calling scope.
pub fn apply_strict(builtin: Builtin, args: &[Value]) -> Result<Value, LispError> {
    match builtin {
        Builtin::Add => arithmetic::add(args),
        Builtin::Sub => arithmetic::sub(args),
        Builtin::Mul => arithmetic::mul(args),
        Builtin::Div => arithmetic::div(args),
        Builtin::Min => arithmetic::min(args),
        Builtin::Max => arithmetic::max(args),
        Builtin::Abs => arithmetic::abs(args),
        Builtin::Lt => comparison::lt(args),
        Builtin::Gt => comparison::gt(args),
        Builtin::Le => comparison::le(args),
        Builtin::Ge => comparison::ge(args),
        Builtin::NumEq => comparison::num_eq(args),
        Builtin::Cons => lists::cons_builtin(args),
        Builtin::Car => lists::car(args),
        Builtin::Cdr => lists::cdr(args),
        Builtin::Not => logic::not(args),
        Builtin::IsNull => predicates::is_null(args),
        Builtin::IsPair => predicates::is_pair(args),
        Builtin::IsList => predicates::is_list(args),
        Builtin::IsNumber => predicates::is_number(args),
        Builtin::IsBoolean => predicates::is_boolean(args),
        Builtin::IsSymbol => predicates::is_symbol(args),
        _ => unreachable!("{:?} is a special form, not a strict primitive", builtin),
    }
}

/// Extracts every argument as an integer, or fails with a type-mismatch
/// error naming the offending position.
pub(crate) fn require_integers(function: &str, args: &[Value]) -> Result<Vec<i64>, LispError> {
    args.iter()
        .map(|v| {
            v.as_integer()
                .ok_or_else(|| LispError::type_mismatch(function, "integer", v.type_name()))
        })
        .collect()
}

pub(crate) fn require_one<'a>(function: &str, args: &'a [Value]) -> Result<&'a Value, LispError> {
    match args {
        [only] => Ok(only),
        _ => Err(LispError::arity(function, crate::error::ARITY_ONE, args.len())),
    }
}
