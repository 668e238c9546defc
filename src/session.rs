// ABOUTME: Ties the tokenizer, reader, evaluator, and printer into one entry point

use crate::env::Environment;
use crate::error::LispError;
use crate::eval::eval;
use crate::reader::read;
use std::rc::Rc;

/// One interpreter instance: a root scope that accumulates top-level
/// `define`s across calls to [`Session::build`].
pub struct Session {
    root: Rc<Environment>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            root: Environment::new(),
        }
    }

    /// Reads exactly one expression from `source`, evaluates it against
    /// the root scope, and renders the result back to text.
    pub fn build(&self, source: &str) -> Result<String, LispError> {
        let value = read(source)?;
        let result = eval(&value, &self.root)?;
        Ok(result.to_string())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
