//! Structural checks run on raw text before (or instead of) a full parse.
//!
//! The checks run in a fixed order and the first failing one wins:
//! 1. the text is not empty after trimming,
//! 2. parentheses are balanced,
//! 3. every run of operator characters is a single operator,
//! 4. no two operators stand next to each other with only whitespace between,
//! 5. every `name(` is a supported function.
//!
//! The default validator is strict: `3 * -2` and `2^-1` are rejected with
//! `ConsecutiveOperators`/`InvalidOperator`. [`Validator::relaxed`] lets a single
//! unary minus follow another operator.
use crate::errors::{CalcError, CalcResult, ErrorKind};
use crate::symbolic::lexer::is_operator_char;
use crate::symbolic::utils::{BracketBalance, bracket_balance};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// functions the validator and the evaluator accept (case-insensitive)
pub const SUPPORTED_FUNCTIONS: [&str; 12] = [
    "sin", "cos", "tan", "log", "ln", "sqrt", "abs", "floor", "ceil", "round", "max", "min",
];

static OPERATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\-*/^%]{2,}").expect("valid operator regex"));
static FUNCTION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("valid function call regex")
});

pub fn is_supported_function(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SUPPORTED_FUNCTIONS.contains(&lower.as_str())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<CalcError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        ValidationResult {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: CalcError) -> Self {
        ValidationResult {
            is_valid: false,
            error: Some(error),
        }
    }

    pub fn into_result(self) -> CalcResult<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Validator {
    allow_unary_minus: bool,
}

impl Validator {
    pub fn strict() -> Self {
        Validator {
            allow_unary_minus: false,
        }
    }

    /// accepts `3 * -2`, `2^-1`, `4*-x`
    pub fn relaxed() -> Self {
        Validator {
            allow_unary_minus: true,
        }
    }

    pub fn validate(&self, text: &str) -> ValidationResult {
        match self.check(text) {
            Ok(()) => ValidationResult::valid(),
            Err(e) => {
                debug!("validation of '{}' failed: {}", text, e);
                ValidationResult::invalid(e)
            }
        }
    }

    fn check(&self, text: &str) -> CalcResult<()> {
        if text.trim().is_empty() {
            return Err(CalcError::new(
                ErrorKind::EmptyExpression,
                "expression is empty",
            ));
        }
        check_parentheses(text)?;
        self.check_operator_runs(text)?;
        self.check_consecutive_operators(text)?;
        check_functions(text)
    }

    fn check_operator_runs(&self, text: &str) -> CalcResult<()> {
        for run in OPERATOR_RUN.find_iter(text) {
            let op = run.as_str();
            if self.allow_unary_minus && op.len() == 2 && op.ends_with('-') {
                continue;
            }
            return Err(CalcError::new(
                ErrorKind::InvalidOperator,
                format!("invalid operator '{}' at position {}", op, run.start()),
            )
            .at(run.start()));
        }
        Ok(())
    }

    fn check_consecutive_operators(&self, text: &str) -> CalcResult<()> {
        let mut previous: Option<(usize, char)> = None;
        for (i, c) in text.char_indices().filter(|(_, c)| !c.is_whitespace()) {
            if let Some((prev_pos, prev)) = previous {
                // adjacent pairs were already handled by the operator-run check
                let separated = i > prev_pos + prev.len_utf8();
                if separated
                    && is_operator_char(prev)
                    && is_operator_char(c)
                    && !(self.allow_unary_minus && c == '-')
                {
                    return Err(CalcError::new(
                        ErrorKind::ConsecutiveOperators,
                        format!(
                            "operators '{}' and '{}' follow each other at position {}",
                            prev, c, i
                        ),
                    )
                    .at(i));
                }
            }
            previous = Some((i, c));
        }
        Ok(())
    }
}

fn check_parentheses(text: &str) -> CalcResult<()> {
    match bracket_balance(text) {
        BracketBalance::Balanced => Ok(()),
        BracketBalance::MissingOpening(pos) => Err(CalcError::new(
            ErrorKind::UnbalancedParentheses,
            format!("missing opening parenthesis for ')' at position {}", pos),
        )
        .with_detail("missing_opening")
        .at(pos)),
        BracketBalance::MissingClosing(pos) => Err(CalcError::new(
            ErrorKind::UnbalancedParentheses,
            format!("missing closing parenthesis for '(' at position {}", pos),
        )
        .with_detail("missing_closing")
        .at(pos)),
    }
}

fn check_functions(text: &str) -> CalcResult<()> {
    for call in FUNCTION_CALL.captures_iter(text) {
        let name = &call[1];
        if !is_supported_function(name) {
            let pos = call.get(1).map(|m| m.start()).unwrap_or(0);
            return Err(CalcError::new(
                ErrorKind::UnsupportedFunction,
                format!("unsupported function '{}'", name),
            )
            .with_detail(name.to_string())
            .at(pos));
        }
    }
    Ok(())
}

/// Strict validation, see the module docs.
pub fn validate(text: &str) -> ValidationResult {
    Validator::strict().validate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(text: &str) -> Option<ErrorKind> {
        validate(text).error.map(|e| e.kind)
    }

    #[test]
    fn test_valid_expressions() {
        for text in [
            "2+3*4",
            "sin(x)/x",
            "max(1, 2) - min(a, b)",
            "(1 + 2) * (3 - 4) ^ 2 % 5",
            "-3 + 2",
            "(-x)",
            "2x + 3(y - 1)",
            "SQRT(16)",
        ] {
            let result = validate(text);
            assert!(result.is_valid, "{} should be valid: {:?}", text, result.error);
        }
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(kind_of(""), Some(ErrorKind::EmptyExpression));
        assert_eq!(kind_of("   "), Some(ErrorKind::EmptyExpression));
    }

    #[test]
    fn test_parenthesis_direction() {
        let open = validate("(1 + 2").error.unwrap();
        assert_eq!(open.kind, ErrorKind::UnbalancedParentheses);
        assert_eq!(open.detail.as_deref(), Some("missing_closing"));
        assert!(open.message.contains("missing closing"));

        let close = validate("1 + 2)").error.unwrap();
        assert_eq!(close.kind, ErrorKind::UnbalancedParentheses);
        assert_eq!(close.detail.as_deref(), Some("missing_opening"));
        assert_eq!(close.offset, Some(5));
    }

    #[test]
    fn test_parentheses_checked_before_operators() {
        assert_eq!(kind_of("(2 ** 3"), Some(ErrorKind::UnbalancedParentheses));
    }

    #[test]
    fn test_operator_runs() {
        assert_eq!(kind_of("2 ** 3"), Some(ErrorKind::InvalidOperator));
        assert_eq!(kind_of("2 +* 3"), Some(ErrorKind::InvalidOperator));
        assert_eq!(kind_of("3*-2"), Some(ErrorKind::InvalidOperator));
    }

    #[test]
    fn test_consecutive_operators_strict() {
        assert_eq!(kind_of("3 * -2"), Some(ErrorKind::ConsecutiveOperators));
        assert_eq!(kind_of("2 ^ - 1"), Some(ErrorKind::ConsecutiveOperators));
    }

    #[test]
    fn test_relaxed_allows_unary_minus() {
        let relaxed = Validator::relaxed();
        assert!(relaxed.validate("3 * -2").is_valid);
        assert!(relaxed.validate("2^-1").is_valid);
        assert!(!relaxed.validate("3 * +2").is_valid);
        assert!(!relaxed.validate("3 *-- 2").is_valid);
    }

    #[test]
    fn test_unsupported_function() {
        let err = validate("foo(2) + 1").error.unwrap();
        assert_eq!(err.kind, ErrorKind::UnsupportedFunction);
        assert_eq!(err.detail.as_deref(), Some("foo"));
        assert_eq!(err.offset, Some(0));
        assert_eq!(kind_of("exp (1)"), Some(ErrorKind::UnsupportedFunction));
    }

    #[test]
    fn test_into_result() {
        assert!(validate("1+1").into_result().is_ok());
        assert!(validate("1+").into_result().is_ok());
        assert!(validate("(").into_result().is_err());
    }
}
