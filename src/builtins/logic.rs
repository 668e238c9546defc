// ABOUTME: The strict `not` primitive (and/or are special forms for short-circuiting)

use super::require_one;
use crate::error::LispError;
use crate::value::Value;

/// Negates a boolean. Any non-boolean argument, rather than erroring,
/// simply yields `#f` — there is no notion of generalized truthiness here.
pub fn not(args: &[Value]) -> Result<Value, LispError> {
    let value = require_one("not", args)?;
    match value {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        _ => Ok(Value::Bool(false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negates_booleans() {
        assert_eq!(not(&[Value::Bool(true)]).unwrap(), Value::Bool(false));
        assert_eq!(not(&[Value::Bool(false)]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn non_boolean_is_always_false() {
        assert_eq!(not(&[Value::Integer(0)]).unwrap(), Value::Bool(false));
    }
}
