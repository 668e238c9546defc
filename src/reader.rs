// ABOUTME: Recursive-descent parser turning a token stream into a value tree

use crate::error::LispError;
use crate::token::{Token, Tokenizer};
use crate::value::{cons, Value};

/// Reads exactly one top-level expression. Empty input is a runtime error
/// (there was nothing to evaluate), a leading `)` or trailing tokens after
/// a complete expression are syntax errors.
pub fn read(source: &str) -> Result<Value, LispError> {
    let mut tokenizer = Tokenizer::new(source)?;
    if tokenizer.at_end() {
        return Err(LispError::runtime("nothing to read"));
    }
    if tokenizer.current() == Some(&Token::Close) {
        return Err(LispError::syntax("unexpected ')'"));
    }
    let value = read_expr(&mut tokenizer)?;
    if !tokenizer.at_end() {
        return Err(LispError::syntax("trailing input after expression"));
    }
    Ok(value)
}

/// Reads one expression: an atom, a quoted form, or a parenthesized list.
fn read_expr(tokenizer: &mut Tokenizer) -> Result<Value, LispError> {
    match tokenizer.current() {
        Some(Token::Open) => {
            tokenizer.advance()?;
            read_list(tokenizer)
        }
        Some(Token::Quote) => {
            tokenizer.advance()?;
            let quoted = read_expr(tokenizer)?;
            Ok(cons(Value::symbol("quote"), cons(quoted, Value::Empty)))
        }
        Some(Token::Symbol(name)) => {
            let name = name.clone();
            tokenizer.advance()?;
            Ok(Value::symbol(name))
        }
        Some(Token::Integer(n)) => {
            let n = *n;
            tokenizer.advance()?;
            Ok(Value::Integer(n))
        }
        Some(Token::Close) => Err(LispError::syntax("unexpected ')'")),
        Some(Token::Dot) => Err(LispError::syntax("unexpected '.'")),
        None => Err(LispError::syntax("unexpected end of input")),
    }
}

/// Reads the body of a list after the opening `(` has been consumed.
/// Handles the close bracket, the dotted tail, and the recursive
/// element-then-rest case, consing as it unwinds.
fn read_list(tokenizer: &mut Tokenizer) -> Result<Value, LispError> {
    match tokenizer.current() {
        None => Err(LispError::syntax("unterminated list")),
        Some(Token::Close) => {
            tokenizer.advance()?;
            Ok(Value::Empty)
        }
        Some(Token::Dot) => {
            tokenizer.advance()?;
            let tail = read_expr(tokenizer)?;
            if tokenizer.current() != Some(&Token::Close) {
                return Err(LispError::syntax("expected ')' after dotted tail"));
            }
            tokenizer.advance()?;
            Ok(tail)
        }
        _ => {
            let head = read_expr(tokenizer)?;
            let rest = read_list(tokenizer)?;
            Ok(cons(head, rest))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_integer() {
        assert_eq!(read("42").unwrap(), Value::Integer(42));
    }

    #[test]
    fn reads_symbol() {
        assert_eq!(read("foo").unwrap(), Value::symbol("foo"));
    }

    #[test]
    fn reads_proper_list() {
        let expected = cons(Value::Integer(1), cons(Value::Integer(2), Value::Empty));
        assert_eq!(read("(1 2)").unwrap(), expected);
    }

    #[test]
    fn reads_empty_list() {
        assert_eq!(read("()").unwrap(), Value::Empty);
    }

    #[test]
    fn reads_dotted_pair() {
        let expected = cons(Value::Integer(1), Value::Integer(2));
        assert_eq!(read("(1 . 2)").unwrap(), expected);
    }

    #[test]
    fn reads_quote_sugar() {
        let expected = cons(Value::symbol("quote"), cons(Value::symbol("a"), Value::Empty));
        assert_eq!(read("'a").unwrap(), expected);
    }

    #[test]
    fn reads_nested_list() {
        let inner = cons(Value::Integer(2), cons(Value::Integer(3), Value::Empty));
        let expected = cons(Value::Integer(1), cons(inner, Value::Empty));
        assert_eq!(read("(1 (2 3))").unwrap(), expected);
    }

    #[test]
    fn empty_input_is_runtime_error() {
        assert_eq!(read("   "), Err(LispError::runtime("nothing to read")));
    }

    #[test]
    fn leading_close_paren_is_syntax_error() {
        assert!(matches!(read(")"), Err(LispError::Syntax(_))));
    }

    #[test]
    fn trailing_tokens_are_syntax_error() {
        assert!(matches!(read("1 2"), Err(LispError::Syntax(_))));
    }

    #[test]
    fn unterminated_list_is_syntax_error() {
        assert!(matches!(read("(1 2"), Err(LispError::Syntax(_))));
    }
}
