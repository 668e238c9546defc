// ABOUTME: Strict numeric primitives: +, -, *, /, min, max, abs

use super::require_integers;
use crate::error::{LispError, ARITY_AT_LEAST_ONE, ARITY_ONE};
use crate::value::Value;

pub fn add(args: &[Value]) -> Result<Value, LispError> {
    let nums = require_integers("+", args)?;
    Ok(Value::Integer(nums.iter().sum()))
}

/// A single operand is returned unchanged: the formula `2*a0 - sum(args)`
/// degenerates to `a0` when there is only one operand, and to `a0 - a1 -
/// a2 - ...` for the rest, matching ordinary chained subtraction.
pub fn sub(args: &[Value]) -> Result<Value, LispError> {
    let nums = require_integers("-", args)?;
    let first = *nums.first().ok_or_else(|| LispError::arity("-", ARITY_AT_LEAST_ONE, 0))?;
    let mut result = 2 * first;
    for n in &nums {
        result -= n;
    }
    Ok(Value::Integer(result))
}

pub fn mul(args: &[Value]) -> Result<Value, LispError> {
    let nums = require_integers("*", args)?;
    Ok(Value::Integer(nums.iter().product()))
}

/// Same single-operand-identity shape as [`sub`]: `a0^2 / a0 = a0`.
pub fn div(args: &[Value]) -> Result<Value, LispError> {
    let nums = require_integers("/", args)?;
    let first = *nums.first().ok_or_else(|| LispError::arity("/", ARITY_AT_LEAST_ONE, 0))?;
    let mut result = first * first;
    for n in &nums {
        if *n == 0 {
            return Err(LispError::runtime("/: division by zero"));
        }
        result /= n;
    }
    Ok(Value::Integer(result))
}

pub fn min(args: &[Value]) -> Result<Value, LispError> {
    let nums = require_integers("min", args)?;
    nums.into_iter()
        .reduce(std::cmp::min)
        .map(Value::Integer)
        .ok_or_else(|| LispError::arity("min", ARITY_AT_LEAST_ONE, 0))
}

pub fn max(args: &[Value]) -> Result<Value, LispError> {
    let nums = require_integers("max", args)?;
    nums.into_iter()
        .reduce(std::cmp::max)
        .map(Value::Integer)
        .ok_or_else(|| LispError::arity("max", ARITY_AT_LEAST_ONE, 0))
}

pub fn abs(args: &[Value]) -> Result<Value, LispError> {
    match args {
        [only] => {
            let n = only
                .as_integer()
                .ok_or_else(|| LispError::type_mismatch("abs", "integer", only.type_name()))?;
            Ok(Value::Integer(n.abs()))
        }
        _ => Err(LispError::arity("abs", ARITY_ONE, args.len())),
    }
}
