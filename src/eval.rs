// ABOUTME: Tree-walking evaluator: symbol resolution, special forms, and application

use crate::builtins;
use crate::env::Environment;
use crate::error::LispError;
use crate::value::{cons, Builtin, LambdaData, Value};
use std::rc::Rc;

pub fn eval(value: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    match value {
        Value::Integer(_) | Value::Bool(_) | Value::Builtin(_) | Value::Lambda(_) => {
            Ok(value.clone())
        }
        Value::Empty => Ok(Value::Empty),
        Value::Symbol(name) => resolve_symbol(name, env),
        Value::Pair(pair) => {
            let (operator, operands) = {
                let borrowed = pair.borrow();
                (borrowed.0.clone(), borrowed.1.clone())
            };
            let operator = eval(&operator, env)?;
            match &operator {
                Value::Builtin(b) if b.is_special() => eval_special_form(*b, &operands, env),
                Value::Builtin(b) => {
                    let args = eval_args(&operands, env)?;
                    builtins::apply_strict(*b, &args)
                }
                Value::Lambda(lambda) => {
                    let args = eval_args(&operands, env)?;
                    apply_lambda(lambda, &args)
                }
                other => Err(LispError::runtime(format!(
                    "cannot apply non-procedure of type {}",
                    other.type_name()
                ))),
            }
        }
    }
}

/// Boolean literals resolve first, then the special-form keyword table,
/// then the strict-primitive table, and only then the scope chain. This
/// order means keywords and builtin names cannot be shadowed by `define`
/// when they appear in operator position.
fn resolve_symbol(name: &str, env: &Rc<Environment>) -> Result<Value, LispError> {
    match name {
        "#t" => return Ok(Value::Bool(true)),
        "#f" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Some(b) = Builtin::lookup_special(name) {
        return Ok(Value::Builtin(b));
    }
    if let Some(b) = Builtin::lookup_strict(name) {
        return Ok(Value::Builtin(b));
    }
    env.lookup(name)
}

/// Evaluates each element of a raw operand list in order, left to right.
pub fn eval_args(operands: &Value, env: &Rc<Environment>) -> Result<Vec<Value>, LispError> {
    let mut args = Vec::new();
    let mut cur = operands.clone();
    loop {
        match cur {
            Value::Empty => break,
            Value::Pair(pair) => {
                let (car, cdr) = {
                    let borrowed = pair.borrow();
                    (borrowed.0.clone(), borrowed.1.clone())
                };
                args.push(eval(&car, env)?);
                cur = cdr;
            }
            _ => return Err(LispError::syntax("improper argument list")),
        }
    }
    Ok(args)
}

/// Walks a raw (unevaluated) list into a `Vec`, requiring it be proper.
fn list_to_vec(value: &Value) -> Result<Vec<Value>, LispError> {
    let mut items = Vec::new();
    let mut cur = value.clone();
    loop {
        match cur {
            Value::Empty => break,
            Value::Pair(pair) => {
                let (car, cdr) = {
                    let borrowed = pair.borrow();
                    (borrowed.0.clone(), borrowed.1.clone())
                };
                items.push(car);
                cur = cdr;
            }
            _ => return Err(LispError::syntax("expected a proper list")),
        }
    }
    Ok(items)
}

fn expect_symbol(value: &Value) -> Result<Rc<str>, LispError> {
    value
        .as_symbol()
        .cloned()
        .ok_or_else(|| LispError::syntax(format!("expected a symbol, got {}", value.type_name())))
}

/// Creates a fresh child scope of the lambda's captured environment and
/// binds parameters to arguments positionally, one scope per call (no
/// state is shared between separate invocations of the same lambda).
pub fn apply_lambda(lambda: &Rc<LambdaData>, args: &[Value]) -> Result<Value, LispError> {
    if lambda.params.len() != args.len() {
        return Err(LispError::arity(
            "procedure",
            &lambda.params.len().to_string(),
            args.len(),
        ));
    }
    let call_scope = Environment::with_parent(lambda.env.clone());
    for (param, arg) in lambda.params.iter().zip(args) {
        call_scope.define(param.clone(), arg.clone());
    }
    let mut result = Value::Empty;
    for expr in &lambda.body {
        result = eval(expr, &call_scope)?;
    }
    Ok(result)
}

fn eval_special_form(
    form: Builtin,
    operands: &Value,
    env: &Rc<Environment>,
) -> Result<Value, LispError> {
    match form {
        Builtin::Quote => {
            let items = list_to_vec(operands)?;
            match items.len() {
                1 => Ok(items.into_iter().next().unwrap()),
                _ => Err(LispError::syntax("quote requires exactly one operand")),
            }
        }
        Builtin::Lambda => eval_lambda(operands, env),
        Builtin::If => eval_if(operands, env),
        Builtin::Define => eval_define(operands, env),
        Builtin::SetBang => eval_set(operands, env),
        Builtin::And => eval_and(operands, env),
        Builtin::Or => eval_or(operands, env),
        Builtin::SetCarBang => eval_set_car(operands, env),
        Builtin::SetCdrBang => eval_set_cdr(operands, env),
        Builtin::List => eval_list(operands, env),
        Builtin::ListRef => eval_list_ref(operands, env),
        Builtin::ListTail => eval_list_tail(operands, env),
        _ => unreachable!("{:?} is not a special form", form),
    }
}

fn eval_lambda(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let pair = operands
        .as_pair()
        .ok_or_else(|| LispError::syntax("lambda requires a parameter list and a body"))?;
    let (params_raw, body_raw) = {
        let borrowed = pair.borrow();
        (borrowed.0.clone(), borrowed.1.clone())
    };
    let body = list_to_vec(&body_raw)?;
    if body.is_empty() {
        return Err(LispError::syntax("lambda requires at least one body expression"));
    }
    let param_values = list_to_vec(&params_raw)?;
    let params = param_values
        .iter()
        .map(expect_symbol)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Lambda(Rc::new(LambdaData {
        params,
        body,
        env: env.clone(),
    })))
}

fn eval_if(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let items = list_to_vec(operands)?;
    if items.len() != 2 && items.len() != 3 {
        return Err(LispError::syntax("if requires a condition and 1-2 branches"));
    }
    let condition = eval(&items[0], env)?;
    let condition = match condition {
        Value::Bool(b) => b,
        _ => return Err(LispError::syntax("if condition must evaluate to a boolean")),
    };
    if condition {
        eval(&items[1], env)
    } else if items.len() == 3 {
        eval(&items[2], env)
    } else {
        Ok(Value::Empty)
    }
}

/// Handles both forms: `(define name expr)` and the function-definition
/// sugar `(define (name params...) body...)`.
fn eval_define(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let pair = operands
        .as_pair()
        .ok_or_else(|| LispError::syntax("define requires a target and a value"))?;
    let (target, rest) = {
        let borrowed = pair.borrow();
        (borrowed.0.clone(), borrowed.1.clone())
    };
    if let Value::Pair(header) = &target {
        let (name_value, params_raw) = {
            let borrowed = header.borrow();
            (borrowed.0.clone(), borrowed.1.clone())
        };
        let name = expect_symbol(&name_value)?;
        let body = list_to_vec(&rest)?;
        if body.is_empty() {
            return Err(LispError::syntax("define requires at least one body expression"));
        }
        let param_values = list_to_vec(&params_raw)?;
        let params = param_values
            .iter()
            .map(expect_symbol)
            .collect::<Result<Vec<_>, _>>()?;
        let lambda = Value::Lambda(Rc::new(LambdaData {
            params,
            body,
            env: env.clone(),
        }));
        env.define(name, lambda);
        return Ok(Value::Empty);
    }
    let name = expect_symbol(&target)?;
    let values = list_to_vec(&rest)?;
    if values.len() != 1 {
        return Err(LispError::syntax("define requires exactly one value expression"));
    }
    let value = eval(&values[0], env)?;
    env.define(name, value);
    Ok(Value::Empty)
}

fn eval_set(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let items = list_to_vec(operands)?;
    if items.len() != 2 {
        return Err(LispError::syntax("set! requires a symbol and a value"));
    }
    let name = expect_symbol(&items[0])?;
    let value = eval(&items[1], env)?;
    env.assign(&name, value)?;
    Ok(Value::Empty)
}

fn eval_and(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let items = list_to_vec(operands)?;
    let mut result = Value::Bool(true);
    for item in &items {
        result = eval(item, env)?;
        if let Value::Bool(false) = result {
            return Ok(Value::Bool(false));
        }
    }
    Ok(result)
}

fn eval_or(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let items = list_to_vec(operands)?;
    for item in &items {
        let value = eval(item, env)?;
        match value {
            Value::Bool(true) => return Ok(Value::Bool(true)),
            Value::Bool(false) => continue,
            other => return Ok(other),
        }
    }
    Ok(Value::Bool(false))
}

fn eval_set_car(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let (name, new_value) = set_mutator_operands(operands, env)?;
    let bound = env.lookup(&name)?;
    let pair = bound
        .as_pair()
        .ok_or_else(|| LispError::runtime(format!("set-car!: {name} is not a pair")))?;
    pair.borrow_mut().0 = new_value;
    Ok(Value::Empty)
}

fn eval_set_cdr(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let (name, new_value) = set_mutator_operands(operands, env)?;
    let bound = env.lookup(&name)?;
    let pair = bound
        .as_pair()
        .ok_or_else(|| LispError::runtime(format!("set-cdr!: {name} is not a pair")))?;
    pair.borrow_mut().1 = new_value;
    Ok(Value::Empty)
}

fn set_mutator_operands(
    operands: &Value,
    env: &Rc<Environment>,
) -> Result<(Rc<str>, Value), LispError> {
    let items = list_to_vec(operands)?;
    if items.len() != 2 {
        return Err(LispError::syntax("expected a symbol and a value"));
    }
    let name = expect_symbol(&items[0])?;
    let value = eval(&items[1], env)?;
    Ok((name, value))
}

fn eval_list(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let args = eval_args(operands, env)?;
    Ok(args
        .into_iter()
        .rev()
        .fold(Value::Empty, |acc, item| cons(item, acc)))
}

fn eval_list_ref(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let (list, index) = list_index_operands(operands, env)?;
    let mut cur = list;
    for _ in 0..index {
        let pair = cur
            .as_pair()
            .ok_or_else(|| LispError::runtime("list-ref: index out of range"))?;
        let next = pair.borrow().1.clone();
        cur = next;
    }
    let pair = cur
        .as_pair()
        .ok_or_else(|| LispError::runtime("list-ref: index out of range"))?;
    let result = pair.borrow().0.clone();
    Ok(result)
}

fn eval_list_tail(operands: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let (list, index) = list_index_operands(operands, env)?;
    let mut cur = list;
    for _ in 0..index {
        let pair = cur
            .as_pair()
            .ok_or_else(|| LispError::runtime("list-tail: index out of range"))?;
        let next = pair.borrow().1.clone();
        cur = next;
    }
    Ok(cur)
}

fn list_index_operands(
    operands: &Value,
    env: &Rc<Environment>,
) -> Result<(Value, i64), LispError> {
    let items = list_to_vec(operands)?;
    if items.len() != 2 {
        return Err(LispError::syntax("expected a list and an index"));
    }
    let list = eval(&items[0], env)?;
    if !list.is_pair() {
        return Err(LispError::runtime("expected a pair"));
    }
    let index_value = eval(&items[1], env)?;
    let index = index_value
        .as_integer()
        .ok_or_else(|| LispError::runtime("expected an integer index"))?;
    if index < 0 {
        return Err(LispError::runtime("index must be non-negative"));
    }
    Ok((list, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;

    fn eval_source(source: &str, env: &Rc<Environment>) -> Result<Value, LispError> {
        eval(&read(source)?, env)
    }

    #[test]
    fn evaluates_arithmetic() {
        let env = Environment::new();
        assert_eq!(eval_source("(+ 2 4)", &env).unwrap(), Value::Integer(6));
    }

    #[test]
    fn quote_returns_unevaluated_form() {
        let env = Environment::new();
        let expected = cons(Value::symbol("a"), cons(Value::symbol("b"), Value::Empty));
        assert_eq!(eval_source("'(a b)", &env).unwrap(), expected);
        assert_eq!(eval_source("(quote (a b c))", &env).unwrap(), read("(a b c)").unwrap());
    }

    #[test]
    fn define_and_use_function() {
        let env = Environment::new();
        eval_source("(define (inc x) (+ x 1))", &env).unwrap();
        assert_eq!(eval_source("(inc -1)", &env).unwrap(), Value::Integer(0));
    }

    #[test]
    fn recursive_function_reaches_target() {
        let env = Environment::new();
        eval_source(
            "(define (slow-add x y) (if (= y 0) x (slow-add (+ x 1) (- y 1))))",
            &env,
        )
        .unwrap();
        assert_eq!(eval_source("(slow-add 0 200)", &env).unwrap(), Value::Integer(200));
    }

    #[test]
    fn lambda_requires_params_and_body() {
        let env = Environment::new();
        assert!(matches!(eval_source("(lambda)", &env), Err(LispError::Syntax(_))));
        assert!(matches!(eval_source("(lambda x)", &env), Err(LispError::Syntax(_))));
        assert!(matches!(eval_source("(lambda (x))", &env), Err(LispError::Syntax(_))));
    }

    #[test]
    fn closures_capture_defining_scope() {
        let env = Environment::new();
        eval_source("(define x 10)", &env).unwrap();
        eval_source("(define (get-x) x)", &env).unwrap();
        eval_source("(define x 20)", &env).unwrap();
        assert_eq!(eval_source("(get-x)", &env).unwrap(), Value::Integer(20));
    }

    /// A closure's captured scope is the call frame it was created in, not
    /// whatever an enclosing scope's binding later changes to. `get1` closes
    /// over `make-getter`'s own per-call frame, which a later top-level
    /// `(define x ...)` never touches.
    #[test]
    fn closures_are_insulated_from_unrelated_later_redefinition() {
        let env = Environment::new();
        eval_source("(define (make-getter x) (lambda () x))", &env).unwrap();
        eval_source("(define get1 (make-getter 1))", &env).unwrap();
        eval_source("(define x 2)", &env).unwrap();
        assert_eq!(eval_source("(get1)", &env).unwrap(), Value::Integer(1));
    }

    #[test]
    fn mutation_through_set_car_is_visible_via_aliasing() {
        let env = Environment::new();
        eval_source("(define p (cons 1 2))", &env).unwrap();
        eval_source("(set-car! p 99)", &env).unwrap();
        assert_eq!(eval_source("(car p)", &env).unwrap(), Value::Integer(99));
    }

    #[test]
    fn if_requires_boolean_condition() {
        let env = Environment::new();
        assert!(matches!(eval_source("(if 1 2 3)", &env), Err(LispError::Syntax(_))));
    }

    #[test]
    fn and_or_short_circuit() {
        let env = Environment::new();
        assert_eq!(eval_source("(and #t #t)", &env).unwrap(), Value::Bool(true));
        assert_eq!(eval_source("(and #t #f)", &env).unwrap(), Value::Bool(false));
        assert_eq!(eval_source("(or #f 5)", &env).unwrap(), Value::Integer(5));
    }

    #[test]
    fn empty_list_self_evaluates() {
        let env = Environment::new();
        assert_eq!(eval_source("'()", &env).unwrap(), Value::Empty);
    }

    #[test]
    fn calling_non_procedure_is_runtime_error() {
        let env = Environment::new();
        assert!(matches!(eval_source("(1 2)", &env), Err(LispError::Runtime(_))));
    }
}
