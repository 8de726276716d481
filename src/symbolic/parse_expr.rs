//! a module turns a String expression into an expression tree
//!# Example
//! ```
//! use RustedMathCore::symbolic::parse_expr::parse;
//! use RustedMathCore::symbolic::evaluator::{Scope, evaluate};
//! let parsed_expression = parse("2x^2 + sin(x)").unwrap();
//! println!(" parsed_expression {}", parsed_expression);
//! let scope = Scope::new().with("x", 0.0);
//! assert_eq!(evaluate(&parsed_expression, &scope).unwrap(), 0.0);
//! ```
use crate::errors::{CalcError, CalcResult, ErrorKind};
use crate::symbolic::ast::{BinaryOperator, Expr};
use crate::symbolic::lexer::{Token, TokenKind, tokenize};
use log::debug;
use std::str::FromStr;

//
//   precedence, lowest first
//   ________________________________________
//   | additive        |  +  -              |  left assoc
//   | multiplicative  |  *  /  %           |  left assoc
//   | unary           |  -x  +x            |
//   | power           |  ^                 |  right assoc, exponent may be unary
//   | primary         |  1.5  x  (..)  f(..)|
//   |_________________|____________________|

// adjacent token pairs that get an explicit '*' in between: 2x, 2(, )2, )x, )(
fn needs_implicit_multiplication(left: &Token, right: &Token) -> bool {
    matches!(
        (left.kind, right.kind),
        (TokenKind::Number, TokenKind::Identifier)
            | (TokenKind::Number, TokenKind::LeftParen)
            | (TokenKind::RightParen, TokenKind::Number)
            | (TokenKind::RightParen, TokenKind::Identifier)
            | (TokenKind::RightParen, TokenKind::LeftParen)
    )
}

pub fn insert_implicit_multiplication(tokens: &[Token]) -> Vec<Token> {
    let mut result: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(previous) = result.last() {
            if needs_implicit_multiplication(previous, token) {
                result.push(Token::new(TokenKind::Operator, "*", token.offset));
            }
        }
        result.push(token.clone());
    }
    result
}

/// deepest chain of parentheses, unary signs, exponents and call arguments
/// the parser descends into
pub const MAX_NESTING_DEPTH: usize = 100;

/// deepest expression tree the parser builds; long flat chains such as
/// `1+1+...+1` stay shallow in the parser but not in the tree
pub const MAX_TREE_DEPTH: usize = 256;

// a subtree together with its depth
type Node = (Expr, usize);

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    /// offset reported by UnexpectedEnd
    end_offset: usize,
    nesting: usize,
}

impl ExprParser {
    fn new(tokens: &[Token], end_offset: usize) -> Self {
        ExprParser {
            tokens: insert_implicit_multiplication(tokens),
            pos: 0,
            end_offset,
            nesting: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self) -> CalcResult<Token> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token.clone())
            }
            None => Err(self.unexpected_end()),
        }
    }

    fn unexpected_end(&self) -> CalcError {
        CalcError::new(
            ErrorKind::UnexpectedEnd,
            format!("unexpected end of expression at position {}", self.end_offset),
        )
        .at(self.end_offset)
    }

    fn unexpected(token: &Token) -> CalcError {
        CalcError::new(ErrorKind::UnexpectedToken, format!("unexpected token {}", token))
            .with_detail(token.text.clone())
            .at(token.offset)
    }

    fn too_deep(&self, what: &str, max: usize) -> CalcError {
        let offset = self.peek().map(|t| t.offset).unwrap_or(self.end_offset);
        CalcError::new(
            ErrorKind::UnexpectedToken,
            format!("{} deeper than {} levels at position {}", what, max, offset),
        )
        .with_detail("nesting too deep")
        .at(offset)
    }

    fn node(&self, expr: Expr, depth: usize) -> CalcResult<Node> {
        if depth > MAX_TREE_DEPTH {
            return Err(self.too_deep("expression tree", MAX_TREE_DEPTH));
        }
        Ok((expr, depth))
    }

    /// the next token is an operator from `ops`; consumes it
    fn eat_operator(&mut self, ops: &[&str]) -> Option<BinaryOperator> {
        let token = self.peek()?;
        if token.kind != TokenKind::Operator || !ops.contains(&token.text.as_str()) {
            return None;
        }
        let op = BinaryOperator::from_str(&token.text).ok()?;
        self.pos += 1;
        Some(op)
    }

    fn expect(&mut self, kind: TokenKind) -> CalcResult<Token> {
        let token = self.next_token()?;
        if token.kind != kind {
            return Err(Self::unexpected(&token));
        }
        Ok(token)
    }

    fn parse_root(&mut self) -> CalcResult<Expr> {
        if self.tokens.is_empty() {
            return Err(CalcError::new(
                ErrorKind::EmptyExpression,
                "expression is empty",
            ));
        }
        let (expr, _) = self.parse_additive()?;
        if let Some(trailing) = self.peek() {
            return Err(Self::unexpected(trailing));
        }
        Ok(expr)
    }

    fn parse_additive(&mut self) -> CalcResult<Node> {
        let (mut left, mut depth) = self.parse_multiplicative()?;
        while let Some(op) = self.eat_operator(&["+", "-"]) {
            let (right, right_depth) = self.parse_multiplicative()?;
            (left, depth) = self.node(Expr::binary(op, left, right), depth.max(right_depth) + 1)?;
        }
        Ok((left, depth))
    }

    fn parse_multiplicative(&mut self) -> CalcResult<Node> {
        let (mut left, mut depth) = self.parse_unary()?;
        while let Some(op) = self.eat_operator(&["*", "/", "%"]) {
            let (right, right_depth) = self.parse_unary()?;
            (left, depth) = self.node(Expr::binary(op, left, right), depth.max(right_depth) + 1)?;
        }
        Ok((left, depth))
    }

    // every nested construct passes through here, so this is where descent is bounded
    fn parse_unary(&mut self) -> CalcResult<Node> {
        if self.nesting >= MAX_NESTING_DEPTH {
            return Err(self.too_deep("expression nesting", MAX_NESTING_DEPTH));
        }
        self.nesting += 1;
        let result = self.parse_signed();
        self.nesting -= 1;
        result
    }

    fn parse_signed(&mut self) -> CalcResult<Node> {
        match self.peek() {
            Some(token) if token.is_operator("-") => {
                self.pos += 1;
                let (operand, depth) = self.parse_unary()?;
                self.node(Expr::neg(operand), depth + 1)
            }
            Some(token) if token.is_operator("+") => {
                self.pos += 1;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<Node> {
        let (base, base_depth) = self.parse_primary()?;
        if self.eat_operator(&["^"]).is_some() {
            // recursing through unary gives right associativity: 2^3^2 = 2^(3^2)
            let (exponent, exponent_depth) = self.parse_unary()?;
            return self.node(
                Expr::binary(BinaryOperator::Pow, base, exponent),
                base_depth.max(exponent_depth) + 1,
            );
        }
        Ok((base, base_depth))
    }

    fn parse_primary(&mut self) -> CalcResult<Node> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Number => token
                .text
                .parse::<f64>()
                .map(|v| (Expr::Number(v), 1))
                .map_err(|_| {
                    CalcError::new(
                        ErrorKind::InvalidToken,
                        format!("malformed number {}", token),
                    )
                    .at(token.offset)
                }),
            TokenKind::Identifier => {
                let is_call = self
                    .peek()
                    .map(|t| t.kind == TokenKind::LeftParen)
                    .unwrap_or(false);
                if is_call {
                    self.pos += 1;
                    let (args, depth) = self.parse_arguments()?;
                    self.node(Expr::FunctionCall(token.text, args), depth + 1)
                } else {
                    Ok((Expr::Variable(token.text), 1))
                }
            }
            TokenKind::LeftParen => {
                let inner = self.parse_additive()?;
                self.expect(TokenKind::RightParen)?;
                Ok(inner)
            }
            _ => Err(Self::unexpected(&token)),
        }
    }

    // the '(' is already consumed; returns the arguments and the deepest one
    fn parse_arguments(&mut self) -> CalcResult<(Vec<Expr>, usize)> {
        let mut args = Vec::new();
        let mut deepest = 0;
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::RightParen {
                self.pos += 1;
                return Ok((args, deepest));
            }
        }
        loop {
            let (arg, depth) = self.parse_additive()?;
            args.push(arg);
            deepest = deepest.max(depth);
            let separator = self.next_token()?;
            match separator.kind {
                TokenKind::Comma => continue,
                TokenKind::RightParen => return Ok((args, deepest)),
                _ => return Err(Self::unexpected(&separator)),
            }
        }
    }
}

/// Builds an expression tree from already tokenized input.
pub fn parse_tokens(tokens: &[Token]) -> CalcResult<Expr> {
    let end_offset = tokens.last().map(Token::end).unwrap_or(0);
    ExprParser::new(tokens, end_offset).parse_root()
}

/// Tokenizes and parses `text`.
///
/// # Errors
/// `InvalidToken` from the lexer, `EmptyExpression`, `UnexpectedToken` or
/// `UnexpectedEnd` (offset = text length) from the parser. Input nested deeper
/// than [`MAX_NESTING_DEPTH`] or producing a tree deeper than [`MAX_TREE_DEPTH`]
/// is an `UnexpectedToken` with detail `"nesting too deep"`.
pub fn parse(text: &str) -> CalcResult<Expr> {
    let tokens = tokenize(text)?;
    let expr = ExprParser::new(&tokens, text.len()).parse_root()?;
    debug!("parsed '{}' into {}", text, expr);
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Expr {
        Expr::Number(v)
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse("42").unwrap(), num(42.0));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse("x").unwrap(), Expr::var("x"));
    }

    #[test]
    fn test_precedence() {
        let expr = parse("2+3*4").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOperator::Add,
                num(2.0),
                Expr::binary(BinaryOperator::Mul, num(3.0), num(4.0))
            )
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        let expr = parse("x^2 - x - 1").unwrap();
        let x = Expr::var("x");
        let expected = Expr::binary(
            BinaryOperator::Sub,
            Expr::binary(
                BinaryOperator::Sub,
                Expr::binary(BinaryOperator::Pow, x.clone(), num(2.0)),
                x,
            ),
            num(1.0),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_power_right_associative() {
        let expr = parse("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOperator::Pow,
                num(2.0),
                Expr::binary(BinaryOperator::Pow, num(3.0), num(2.0))
            )
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        // -2^2 = -(2^2)
        let expr = parse("-2^2").unwrap();
        assert_eq!(
            expr,
            Expr::neg(Expr::binary(BinaryOperator::Pow, num(2.0), num(2.0)))
        );
        let expr = parse("2^-1").unwrap();
        assert_eq!(
            expr,
            Expr::binary(BinaryOperator::Pow, num(2.0), Expr::neg(num(1.0)))
        );
        assert_eq!(parse("+x").unwrap(), Expr::var("x"));
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(
            parse("max(x, 2, y)").unwrap(),
            Expr::call("max", vec![Expr::var("x"), num(2.0), Expr::var("y")])
        );
        assert_eq!(
            parse("sin(cos(x))").unwrap(),
            Expr::call("sin", vec![Expr::call("cos", vec![Expr::var("x")])])
        );
        assert_eq!(parse("f()").unwrap(), Expr::call("f", vec![]));
    }

    #[test]
    fn test_implicit_multiplication() {
        let two_x = Expr::binary(BinaryOperator::Mul, num(2.0), Expr::var("x"));
        assert_eq!(parse("2x").unwrap(), two_x);
        assert_eq!(
            parse("(x+1)(x-1)").unwrap(),
            Expr::binary(
                BinaryOperator::Mul,
                Expr::binary(BinaryOperator::Add, Expr::var("x"), num(1.0)),
                Expr::binary(BinaryOperator::Sub, Expr::var("x"), num(1.0))
            )
        );
        assert_eq!(
            parse("3(y)").unwrap(),
            Expr::binary(BinaryOperator::Mul, num(3.0), Expr::var("y"))
        );
        assert_eq!(
            parse("(2)x").unwrap(),
            Expr::binary(BinaryOperator::Mul, num(2.0), Expr::var("x"))
        );
        // function call, not x*(...)
        assert_eq!(parse("x(2)").unwrap(), Expr::call("x", vec![num(2.0)]));
    }

    #[test]
    fn test_implicit_multiplication_token_offsets() {
        let tokens = tokenize("2 x").unwrap();
        let with_mul = insert_implicit_multiplication(&tokens);
        assert_eq!(with_mul.len(), 3);
        assert_eq!(with_mul[1], Token::new(TokenKind::Operator, "*", 2));
    }

    #[test]
    fn test_unexpected_end() {
        let err = parse("(x +").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
        assert_eq!(err.offset, Some(4));
        assert_eq!(parse("2*").unwrap_err().kind, ErrorKind::UnexpectedEnd);
        assert_eq!(parse("(x + y").unwrap_err().kind, ErrorKind::UnexpectedEnd);
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse("2 3").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.offset, Some(2));

        let err = parse("x + y)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.offset, Some(5));

        assert_eq!(parse("*2").unwrap_err().kind, ErrorKind::UnexpectedToken);
        assert_eq!(parse("max(1 2)").unwrap_err().kind, ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(parse("   ").unwrap_err().kind, ErrorKind::EmptyExpression);
        assert_eq!(parse("2 # 3").unwrap_err().kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_parse_tokens_directly() {
        let tokens = tokenize("1 + ").unwrap();
        let err = parse_tokens(&tokens).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEnd);
        assert_eq!(err.offset, Some(3));
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let n = 10_000;
        let text = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        let err = parse(&text).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.detail.as_deref(), Some("nesting too deep"));
        assert_eq!(err.offset, Some(MAX_NESTING_DEPTH));
    }

    #[test]
    fn test_long_unary_chain_is_rejected() {
        let text = format!("{}1", "-".repeat(10_000));
        let err = parse(&text).unwrap_err();
        assert_eq!(err.detail.as_deref(), Some("nesting too deep"));
        let text = format!("2{}", "^2".repeat(10_000));
        assert_eq!(
            parse(&text).unwrap_err().detail.as_deref(),
            Some("nesting too deep")
        );
    }

    #[test]
    fn test_long_flat_chain_is_rejected() {
        let text = vec!["1"; 10_000].join("+");
        let err = parse(&text).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.detail.as_deref(), Some("nesting too deep"));
        // shorter chains are fine
        let text = vec!["1"; 200].join("+");
        assert!(parse(&text).is_ok());
    }

    #[test]
    fn test_moderate_nesting_still_parses() {
        let text = format!("{}x{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(parse(&text).unwrap(), Expr::var("x"));
        let text = format!("{}1", "-".repeat(50));
        assert!(parse(&text).is_ok());
        let text = format!("{}x{}", "sin(".repeat(40), ")".repeat(40));
        assert!(parse(&text).is_ok());
    }
}
