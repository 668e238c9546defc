// ABOUTME: Character-level lexer producing a lookahead-one stream of tokens

use crate::error::LispError;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Dot,
    Quote,
    Integer(i64),
    Symbol(String),
}

/// Wraps a character stream and exposes `current`/`advance`/`at_end` so the
/// reader never has to touch raw characters. Whitespace is skipped lazily,
/// on the way to computing the next token, rather than in a separate pass.
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    current: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Result<Self, LispError> {
        let mut tokenizer = Tokenizer {
            chars: source.chars().peekable(),
            current: None,
        };
        tokenizer.advance()?;
        Ok(tokenizer)
    }

    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Computes the next token and makes it current, returning the previous
    /// one. Returns `Ok(None)` once the underlying stream is exhausted.
    pub fn advance(&mut self) -> Result<Option<Token>, LispError> {
        let next = self.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, LispError> {
        self.skip_whitespace();
        let c = match self.chars.peek() {
            Some(&c) => c,
            None => return Ok(None),
        };

        match c {
            '(' => {
                self.chars.next();
                Ok(Some(Token::Open))
            }
            ')' => {
                self.chars.next();
                Ok(Some(Token::Close))
            }
            '\'' => {
                self.chars.next();
                Ok(Some(Token::Quote))
            }
            '.' => {
                self.chars.next();
                Ok(Some(Token::Dot))
            }
            '0'..='9' => Ok(Some(self.read_integer()?)),
            '+' | '-' => {
                self.chars.next();
                if matches!(self.chars.peek(), Some(d) if d.is_ascii_digit()) {
                    Ok(Some(self.read_integer_with_sign(c)?))
                } else {
                    Ok(Some(Token::Symbol(c.to_string())))
                }
            }
            _ if is_symbol_char(c) => {
                let text = self.read_symbol_tail();
                Ok(Some(Token::Symbol(text)))
            }
            _ => Err(LispError::syntax(format!("unexpected character '{c}'"))),
        }
    }

    fn read_integer(&mut self) -> Result<Token, LispError> {
        let text = self.read_digits();
        text.parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| LispError::syntax(format!("integer literal out of range: '{text}'")))
    }

    fn read_integer_with_sign(&mut self, sign: char) -> Result<Token, LispError> {
        let mut text = String::from(sign);
        text.push_str(&self.read_digits());
        text.parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| LispError::syntax(format!("integer literal out of range: '{text}'")))
    }

    /// Consumes only the decimal-digit run. Used for numeric literals, so a
    /// digit run directly abutting a non-digit symbol character (`5x`)
    /// yields two tokens rather than one malformed one.
    fn read_digits(&mut self) -> String {
        let mut text = String::new();
        while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
            text.push(self.chars.next().unwrap());
        }
        text
    }

    /// Accumulates characters until whitespace or a special character is
    /// hit. Deliberately permissive, since `#t`/`#f` and arbitrary symbol
    /// names share this catch-all.
    fn read_symbol_tail(&mut self) -> String {
        let mut text = String::new();
        while matches!(self.chars.peek(), Some(&c) if is_symbol_char(c)) {
            text.push(self.chars.next().unwrap());
        }
        text
    }
}

fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != '\'' && c != '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut tokenizer = Tokenizer::new(source).unwrap();
        let mut out = Vec::new();
        while let Some(tok) = tokenizer.current().cloned() {
            out.push(tok);
            tokenizer.advance().unwrap();
        }
        out
    }

    #[test]
    fn lexes_parens_and_integers() {
        assert_eq!(
            tokens("(+ 1 2)"),
            vec![
                Token::Open,
                Token::Symbol("+".to_string()),
                Token::Integer(1),
                Token::Integer(2),
                Token::Close,
            ]
        );
    }

    #[test]
    fn negative_integer_vs_minus_symbol() {
        assert_eq!(tokens("-5"), vec![Token::Integer(-5)]);
        assert_eq!(tokens("-"), vec![Token::Symbol("-".to_string())]);
        assert_eq!(tokens("- 5"), vec![Token::Symbol("-".to_string()), Token::Integer(5)]);
    }

    /// A `+`/`-` not immediately followed by a digit is always a single-
    /// character symbol token, never folded into a run with what follows.
    #[test]
    fn sign_not_followed_by_digit_is_a_lone_symbol() {
        assert_eq!(
            tokens("-foo"),
            vec![Token::Symbol("-".to_string()), Token::Symbol("foo".to_string())]
        );
        assert_eq!(
            tokens("+bar"),
            vec![Token::Symbol("+".to_string()), Token::Symbol("bar".to_string())]
        );
    }

    /// A digit run directly abutting a non-digit symbol character, with no
    /// separating whitespace, splits into an integer token followed by a
    /// symbol token rather than failing to parse as one run.
    #[test]
    fn digit_run_stops_at_non_digit_symbol_char() {
        assert_eq!(
            tokens("5x"),
            vec![Token::Integer(5), Token::Symbol("x".to_string())]
        );
    }

    #[test]
    fn lexes_booleans_as_symbols() {
        assert_eq!(tokens("#t #f"), vec![Token::Symbol("#t".to_string()), Token::Symbol("#f".to_string())]);
    }

    #[test]
    fn lexes_quote_and_dot() {
        assert_eq!(
            tokens("'(1 . 2)"),
            vec![
                Token::Quote,
                Token::Open,
                Token::Integer(1),
                Token::Dot,
                Token::Integer(2),
                Token::Close,
            ]
        );
    }

    #[test]
    fn empty_source_has_no_tokens() {
        let tokenizer = Tokenizer::new("   ").unwrap();
        assert!(tokenizer.at_end());
    }

    #[test]
    fn rejects_overflowing_integer() {
        let result = Tokenizer::new("99999999999999999999");
        assert!(matches!(result, Err(LispError::Syntax(_))));
    }

    #[test]
    fn multi_char_symbols_with_star() {
        assert_eq!(tokens("foo* *bar list->vector"), vec![
            Token::Symbol("foo*".to_string()),
            Token::Symbol("*bar".to_string()),
            Token::Symbol("list->vector".to_string()),
        ]);
    }
}
