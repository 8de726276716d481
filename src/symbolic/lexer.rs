//! Lexer: turns an expression string into a flat vector of tokens.
//!
//! Built from `nom` combinators. Every token remembers its byte offset in the
//! source text so the parser and the validator can point at the offending place.
//! Implicit multiplication (`2x`, `)(`) is NOT resolved here, see `parse_expr`.
use crate::errors::{CalcError, CalcResult, ErrorKind};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit0, digit1, one_of, satisfy},
    combinator::{map, opt, recognize},
    sequence::pair,
};
use std::fmt;

pub const OPERATOR_CHARS: &str = "+-*/^%";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Operator,
    LeftParen,
    RightParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// byte offset of the first character
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, offset: usize) -> Token {
        Token {
            kind,
            text: text.to_string(),
            offset,
        }
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// offset right after the token
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' at position {}", self.text, self.offset)
    }
}

pub fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(c)
}

// 12, 12., 12.5, .5 with an optional exponent 1e-3; "2e" stays the number 2
fn number(input: &str) -> IResult<&str, &str> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = recognize(pair(one_of("eE"), pair(opt(one_of("+-")), digit1)));
    recognize(pair(mantissa, opt(exponent))).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn lex_token(input: &str) -> IResult<&str, (TokenKind, &str)> {
    alt((
        map(number, |s| (TokenKind::Number, s)),
        map(identifier, |s| (TokenKind::Identifier, s)),
        map(recognize(one_of(OPERATOR_CHARS)), |s| (TokenKind::Operator, s)),
        map(recognize(char('(')), |s| (TokenKind::LeftParen, s)),
        map(recognize(char(')')), |s| (TokenKind::RightParen, s)),
        map(recognize(char(',')), |s| (TokenKind::Comma, s)),
    ))
    .parse(input)
}

/// Splits `text` into tokens; whitespace is skipped.
///
/// # Errors
/// `InvalidToken` carrying the offset of the first unknown character.
pub fn tokenize(text: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let offset = text.len() - rest.len();
        match lex_token(rest) {
            Ok((remaining, (kind, slice))) => {
                tokens.push(Token::new(kind, slice, offset));
                rest = remaining.trim_start();
            }
            Err(_) => {
                let bad = rest.chars().next().unwrap_or(' ');
                return Err(CalcError::new(
                    ErrorKind::InvalidToken,
                    format!("unknown character '{}' at position {}", bad, offset),
                )
                .at(offset));
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_simple_sum() {
        let tokens = tokenize("2 + 3.5").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Number, "2", 0),
                Token::new(TokenKind::Operator, "+", 2),
                Token::new(TokenKind::Number, "3.5", 4),
            ]
        );
    }

    #[test]
    fn test_numbers_with_exponent_and_leading_dot() {
        let tokens = tokenize("1.5e-3 .25 7E2").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["1.5e-3", ".25", "7E2"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_dangling_exponent_is_identifier() {
        // 2e is 2 times the constant e
        let tokens = tokenize("2e").unwrap();
        assert_eq!(tokens[0].text, "2");
        assert_eq!(tokens[1], Token::new(TokenKind::Identifier, "e", 1));
    }

    #[test]
    fn test_function_call_tokens() {
        assert_eq!(
            kinds("max(x_1, 2)"),
            vec![
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RightParen
            ]
        );
    }

    #[test]
    fn test_all_operators() {
        let tokens = tokenize("+-*/^%").unwrap();
        assert_eq!(tokens.len(), 6);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Operator));
        assert!(tokens[4].is_operator("^"));
    }

    #[test]
    fn test_invalid_token_offset() {
        let err = tokenize("2 + $x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        assert_eq!(err.offset, Some(4));
    }

    #[test]
    fn test_whitespace_only_gives_no_tokens() {
        assert!(tokenize("  \t ").unwrap().is_empty());
    }
}
