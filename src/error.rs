// ABOUTME: Error types for the reader and evaluator, classified by detection point

use thiserror::Error;

// ===== Arity constant strings (eliminates allocations in error paths) =====
pub const ARITY_ONE: &str = "1";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";
pub const ARITY_ONE_OR_TWO: &str = "1-2";
pub const ARITY_TWO: &str = "2";

/// The three error kinds a test suite can classify an outcome into.
///
/// SyntaxError covers malformed source (tokenizer/reader failures and
/// special forms given the wrong shape). RuntimeError covers well-formed
/// source that fails at evaluation time (arity/type errors, non-callable
/// application, empty input to the reader). NameError covers unbound
/// symbols, from both lookup and `set!`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LispError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("name error: unbound symbol '{0}'")]
    Name(String),
}

impl LispError {
    pub fn syntax(message: impl Into<String>) -> Self {
        LispError::Syntax(message.into())
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        LispError::Runtime(message.into())
    }

    pub fn name(symbol: impl Into<String>) -> Self {
        LispError::Name(symbol.into())
    }

    pub fn arity(function: &str, expected: &str, actual: usize) -> Self {
        let plural = if expected == ARITY_ONE { "" } else { "s" };
        LispError::Runtime(format!(
            "{function}: expected {expected} argument{plural}, got {actual}"
        ))
    }

    pub fn type_mismatch(function: &str, expected: &str, actual: &str) -> Self {
        LispError::Runtime(format!("{function}: expected {expected}, got {actual}"))
    }
}
