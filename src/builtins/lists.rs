// ABOUTME: Strict pair primitives: cons, car, cdr

use super::require_one;
use crate::error::{LispError, ARITY_TWO};
use crate::value::{cons, Value};

pub fn cons_builtin(args: &[Value]) -> Result<Value, LispError> {
    match args {
        [car, cdr] => Ok(cons(car.clone(), cdr.clone())),
        _ => Err(LispError::arity("cons", ARITY_TWO, args.len())),
    }
}

pub fn car(args: &[Value]) -> Result<Value, LispError> {
    let value = require_one("car", args)?;
    let pair = value
        .as_pair()
        .ok_or_else(|| LispError::type_mismatch("car", "pair", value.type_name()))?;
    Ok(pair.borrow().0.clone())
}

pub fn cdr(args: &[Value]) -> Result<Value, LispError> {
    let value = require_one("cdr", args)?;
    let pair = value
        .as_pair()
        .ok_or_else(|| LispError::type_mismatch("cdr", "pair", value.type_name()))?;
    Ok(pair.borrow().1.clone())
}
