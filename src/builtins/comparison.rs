// ABOUTME: Chained numeric comparisons: <, >, <=, >=, =

use super::require_integers;
use crate::error::LispError;
use crate::value::Value;

/// Shared chained-comparison walk: checks each adjacent pair with `op`,
/// short-circuiting to `#f` on the first pair that fails. Fewer than two
/// arguments trivially succeeds without ever touching the type check.
fn chained(function: &str, args: &[Value], op: impl Fn(i64, i64) -> bool) -> Result<Value, LispError> {
    if args.len() < 2 {
        return Ok(Value::Bool(true));
    }
    let nums = require_integers(function, args)?;
    for pair in nums.windows(2) {
        if !op(pair[0], pair[1]) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

pub fn lt(args: &[Value]) -> Result<Value, LispError> {
    chained("<", args, |a, b| a < b)
}

pub fn gt(args: &[Value]) -> Result<Value, LispError> {
    chained(">", args, |a, b| a > b)
}

pub fn le(args: &[Value]) -> Result<Value, LispError> {
    chained("<=", args, |a, b| a <= b)
}

pub fn ge(args: &[Value]) -> Result<Value, LispError> {
    chained(">=", args, |a, b| a >= b)
}

pub fn num_eq(args: &[Value]) -> Result<Value, LispError> {
    chained("=", args, |a, b| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_ascending() {
        let args = [Value::Integer(1), Value::Integer(2), Value::Integer(3)];
        assert_eq!(lt(&args).unwrap(), Value::Bool(true));
    }

    #[test]
    fn chained_fails_on_any_pair() {
        let args = [Value::Integer(1), Value::Integer(3), Value::Integer(2)];
        assert_eq!(lt(&args).unwrap(), Value::Bool(false));
    }

    #[test]
    fn fewer_than_two_args_trivially_true_without_type_check() {
        assert_eq!(lt(&[]).unwrap(), Value::Bool(true));
        assert_eq!(lt(&[Value::Bool(true)]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn num_eq_checks_all_adjacent_pairs() {
        let args = [Value::Integer(2), Value::Integer(2), Value::Integer(2)];
        assert_eq!(num_eq(&args).unwrap(), Value::Bool(true));
    }
}
