// ABOUTME: Value types representing the evaluator's tagged-variant data model

use crate::env::Environment;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One mutable cons cell: an owning reference to car and cdr, both mutable
/// in place so `set-car!`/`set-cdr!` are visible through every alias.
pub type PairRef = Rc<RefCell<(Value, Value)>>;

pub fn cons(car: Value, cdr: Value) -> Value {
    Value::Pair(Rc::new(RefCell::new((car, cdr))))
}

/// A user-defined procedure: parameter list, non-empty body, and the scope
/// captured at the point of construction (lexical scoping).
#[derive(Debug)]
pub struct LambdaData {
    pub params: Vec<Rc<str>>,
    pub body: Vec<Value>,
    pub env: Rc<Environment>,
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Bool(bool),
    Symbol(Rc<str>),
    Pair(PairRef),
    Empty,
    Builtin(Builtin),
    Lambda(Rc<LambdaData>),
}

impl Value {
    pub fn symbol(name: impl Into<Rc<str>>) -> Value {
        Value::Symbol(name.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Symbol(_) => "symbol",
            Value::Pair(_) => "pair",
            Value::Empty => "empty list",
            Value::Builtin(b) if b.is_special() => "special form",
            Value::Builtin(_) => "builtin procedure",
            Value::Lambda(_) => "procedure",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Value::Lambda(_)) || matches!(self, Value::Builtin(b) if !b.is_special())
    }

    pub fn is_special_form(&self) -> bool {
        matches!(self, Value::Builtin(b) if b.is_special())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Rc<str>> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&PairRef> {
        match self {
            Value::Pair(p) => Some(p),
            _ => None,
        }
    }

    /// True iff `self` is Empty or a pair chain whose final cdr is Empty.
    /// Does not terminate on a cyclic chain created by `set-cdr!`.
    pub fn is_proper_list(&self) -> bool {
        let mut cur = self.clone();
        loop {
            match cur {
                Value::Empty => return true,
                Value::Pair(p) => cur = p.borrow().1.clone(),
                _ => return false,
            }
        }
    }
}

/// Structural equality: atoms compare by value, pairs compare element-wise
/// through their current contents (not by reference identity).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Empty, Value::Empty) => true,
            (Value::Pair(a), Value::Pair(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a_car, a_cdr) = { let b = a.borrow(); (b.0.clone(), b.1.clone()) };
                let (b_car, b_cdr) = { let b = b.borrow(); (b.0.clone(), b.1.clone()) };
                a_car == b_car && a_cdr == b_cdr
            }
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Empty => write!(f, "()"),
            Value::Pair(pair) => {
                write!(f, "(")?;
                let (car, mut rest) = {
                    let borrowed = pair.borrow();
                    (borrowed.0.clone(), borrowed.1.clone())
                };
                write!(f, "{car}")?;
                loop {
                    match rest {
                        Value::Empty => break,
                        Value::Pair(next) => {
                            let (car, cdr) = {
                                let borrowed = next.borrow();
                                (borrowed.0.clone(), borrowed.1.clone())
                            };
                            write!(f, " {car}")?;
                            rest = cdr;
                        }
                        other => {
                            write!(f, " . {other}")?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
            Value::Builtin(b) => write!(f, "#<builtin:{}>", b.name()),
            Value::Lambda(_) => write!(f, "#<procedure>"),
        }
    }
}

/// The fixed enumerated set of builtin procedures. A builtin is either a
/// *strict* primitive (arguments evaluated before it runs) or a
/// *special form* (it receives the raw, unevaluated operand list and the
/// current scope). Dispatch reads this tag rather than virtual calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    // special forms
    Quote,
    Lambda,
    If,
    Define,
    SetBang,
    And,
    Or,
    SetCarBang,
    SetCdrBang,
    List,
    ListRef,
    ListTail,

    // strict primitives
    Add,
    Sub,
    Mul,
    Div,
    Min,
    Max,
    Abs,
    Lt,
    Gt,
    Le,
    Ge,
    NumEq,
    Cons,
    Car,
    Cdr,
    Not,
    IsNull,
    IsPair,
    IsList,
    IsNumber,
    IsBoolean,
    IsSymbol,
}

impl Builtin {
    pub fn is_special(self) -> bool {
        matches!(
            self,
            Builtin::Quote
                | Builtin::Lambda
                | Builtin::If
                | Builtin::Define
                | Builtin::SetBang
                | Builtin::And
                | Builtin::Or
                | Builtin::SetCarBang
                | Builtin::SetCdrBang
                | Builtin::List
                | Builtin::ListRef
                | Builtin::ListTail
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Quote => "quote",
            Builtin::Lambda => "lambda",
            Builtin::If => "if",
            Builtin::Define => "define",
            Builtin::SetBang => "set!",
            Builtin::And => "and",
            Builtin::Or => "or",
            Builtin::SetCarBang => "set-car!",
            Builtin::SetCdrBang => "set-cdr!",
            Builtin::List => "list",
            Builtin::ListRef => "list-ref",
            Builtin::ListTail => "list-tail",
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
            Builtin::Min => "min",
            Builtin::Max => "max",
            Builtin::Abs => "abs",
            Builtin::Lt => "<",
            Builtin::Gt => ">",
            Builtin::Le => "<=",
            Builtin::Ge => ">=",
            Builtin::NumEq => "=",
            Builtin::Cons => "cons",
            Builtin::Car => "car",
            Builtin::Cdr => "cdr",
            Builtin::Not => "not",
            Builtin::IsNull => "null?",
            Builtin::IsPair => "pair?",
            Builtin::IsList => "list?",
            Builtin::IsNumber => "number?",
            Builtin::IsBoolean => "boolean?",
            Builtin::IsSymbol => "symbol?",
        }
    }

    /// Looks up a name in the special-form keyword table. Consulted before
    /// [`Builtin::lookup_strict`] during symbol resolution, so these names
    /// cannot be shadowed by `define` when they appear in operator position.
    pub fn lookup_special(name: &str) -> Option<Builtin> {
        Some(match name {
            "quote" => Builtin::Quote,
            "lambda" => Builtin::Lambda,
            "if" => Builtin::If,
            "define" => Builtin::Define,
            "set!" => Builtin::SetBang,
            "and" => Builtin::And,
            "or" => Builtin::Or,
            "set-car!" => Builtin::SetCarBang,
            "set-cdr!" => Builtin::SetCdrBang,
            "list" => Builtin::List,
            "list-ref" => Builtin::ListRef,
            "list-tail" => Builtin::ListTail,
            _ => return None,
        })
    }

    /// Looks up a name in the eager-primitive table.
    pub fn lookup_strict(name: &str) -> Option<Builtin> {
        Some(match name {
            "+" => Builtin::Add,
            "-" => Builtin::Sub,
            "*" => Builtin::Mul,
            "/" => Builtin::Div,
            "min" => Builtin::Min,
            "max" => Builtin::Max,
            "abs" => Builtin::Abs,
            "<" => Builtin::Lt,
            ">" => Builtin::Gt,
            "<=" => Builtin::Le,
            ">=" => Builtin::Ge,
            "=" => Builtin::NumEq,
            "cons" => Builtin::Cons,
            "car" => Builtin::Car,
            "cdr" => Builtin::Cdr,
            "not" => Builtin::Not,
            "null?" => Builtin::IsNull,
            "pair?" => Builtin::IsPair,
            "list?" => Builtin::IsList,
            "number?" => Builtin::IsNumber,
            "boolean?" => Builtin::IsBoolean,
            "symbol?" => Builtin::IsSymbol,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_display() {
        assert_eq!(format!("{}", Value::Integer(42)), "42");
        assert_eq!(format!("{}", Value::Integer(-7)), "-7");
    }

    #[test]
    fn bool_display() {
        assert_eq!(format!("{}", Value::Bool(true)), "#t");
        assert_eq!(format!("{}", Value::Bool(false)), "#f");
    }

    #[test]
    fn empty_display() {
        assert_eq!(format!("{}", Value::Empty), "()");
    }

    #[test]
    fn proper_list_display() {
        let list = cons(Value::Integer(1), cons(Value::Integer(2), cons(Value::Integer(3), Value::Empty)));
        assert_eq!(format!("{}", list), "(1 2 3)");
    }

    #[test]
    fn dotted_pair_display() {
        let pair = cons(Value::Integer(1), Value::Integer(2));
        assert_eq!(format!("{}", pair), "(1 . 2)");
    }

    #[test]
    fn nested_list_display() {
        let inner = cons(Value::Integer(2), cons(Value::Integer(3), Value::Empty));
        let list = cons(Value::Integer(1), cons(inner, Value::Empty));
        assert_eq!(format!("{}", list), "(1 (2 3))");
    }

    #[test]
    fn structural_equality_for_pairs() {
        let a = cons(Value::Integer(1), Value::Integer(2));
        let b = cons(Value::Integer(1), Value::Integer(2));
        assert_eq!(a, b);
    }

    #[test]
    fn is_proper_list_predicate() {
        assert!(Value::Empty.is_proper_list());
        assert!(cons(Value::Integer(1), Value::Empty).is_proper_list());
        assert!(!cons(Value::Integer(1), Value::Integer(2)).is_proper_list());
    }

    #[test]
    fn special_form_lookup_precedes_nothing_else() {
        assert_eq!(Builtin::lookup_special("if"), Some(Builtin::If));
        assert_eq!(Builtin::lookup_special("+"), None);
        assert_eq!(Builtin::lookup_strict("+"), Some(Builtin::Add));
    }
}
