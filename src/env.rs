// ABOUTME: Lexical scope chain used for variable definition, lookup, and assignment

use crate::error::LispError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One frame of the scope chain. Closures capture the `Rc<Environment>` that
/// was current at the point of their construction, not the scope of the
/// call site, giving lexical (not dynamic) scoping.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<Rc<str>, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    pub fn with_parent(parent: Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds `name` in this frame, shadowing any binding of the same name
    /// in an enclosing frame. Re-defining a name already bound in this
    /// frame silently overwrites it.
    pub fn define(&self, name: Rc<str>, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Searches this frame, then each parent in turn.
    pub fn lookup(&self, name: &str) -> Result<Value, LispError> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.lookup(name),
            None => Err(LispError::name(name)),
        }
    }

    /// Assigns to the nearest frame (searching outward) where `name` is
    /// already bound. Unlike `define`, it never creates a new binding.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), LispError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.into(), value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(LispError::name(name)),
        }
    }
}
