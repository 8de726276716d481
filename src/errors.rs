//! # Error taxonomy
//!
//! One error value is shared by every stage of the computation core: the lexer, the
//! validator, the parser, the evaluator, the linear algebra kernel and the formatting
//! engine. An error is pure data: a [`ErrorKind`], a human-readable message and an
//! optional detail string. No stage panics on bad input; callers always receive a
//! classified `CalcError` they can show to the user or hand to the advisory layer.
//!
//! The kind's name (`ErrorKind::as_ref()`) is the stable string handed to external
//! collaborators, the message is what the UI prints verbatim.
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

/// Classification of everything that can go wrong inside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum ErrorKind {
    /// nothing but whitespace was given
    EmptyExpression,
    /// `(` and `)` do not pair up
    UnbalancedParentheses,
    /// a run of operator characters like `**` or `+*`
    InvalidOperator,
    /// two operators separated only by whitespace, e.g. `3 * -2`
    ConsecutiveOperators,
    /// a call to a function that is not in the allow-list
    UnsupportedFunction,
    /// a character the lexer does not know
    InvalidToken,
    /// the parser met a token it did not expect
    UnexpectedToken,
    /// the input ended in the middle of an expression
    UnexpectedEnd,
    /// a variable is not bound in the scope
    UndefinedVariable,
    DivisionByZero,
    /// argument outside of the function domain, e.g. sqrt(-4)
    DomainError,
    /// computation produced NaN
    UndefinedResult,
    /// computation produced +-infinity
    InfiniteResult,
    /// wrong number of arguments passed to a function
    ArgumentCount,
    /// matrix shapes are incompatible for the operation
    DimensionMismatch,
    /// matrix determinant is (numerically) zero
    Singular,
    /// configuration file could not be read or understood
    Config,
}

impl ErrorKind {
    /// Short hint shown next to the error message.
    pub fn suggestion(&self) -> &'static str {
        match self {
            ErrorKind::EmptyExpression => "Type an expression, for example 2 + 3 * x",
            ErrorKind::UnbalancedParentheses => "Check that every '(' has a matching ')'",
            ErrorKind::InvalidOperator => "Use a single operator between operands: + - * / ^ %",
            ErrorKind::ConsecutiveOperators => {
                "Put parentheses around negative numbers, for example 3 * (-2)"
            }
            ErrorKind::UnsupportedFunction => {
                "Supported functions: sin cos tan log ln sqrt abs floor ceil round max min"
            }
            ErrorKind::InvalidToken => "Remove characters that are not numbers, names or operators",
            ErrorKind::UnexpectedToken | ErrorKind::UnexpectedEnd => {
                "The expression is incomplete or has a misplaced symbol"
            }
            ErrorKind::UndefinedVariable => "Give a value to every variable used in the expression",
            ErrorKind::DivisionByZero => "The divisor evaluates to zero",
            ErrorKind::DomainError => "The function is not defined for this argument",
            ErrorKind::UndefinedResult => "The result is not a number",
            ErrorKind::InfiniteResult => "The result is too large to represent",
            ErrorKind::ArgumentCount => "Check how many arguments the function takes",
            ErrorKind::DimensionMismatch => "Check the sizes of the matrices",
            ErrorKind::Singular => "The system has no unique solution",
            ErrorKind::Config => "Check the configuration file",
        }
    }

    /// kinds raised before evaluation starts
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            ErrorKind::EmptyExpression
                | ErrorKind::UnbalancedParentheses
                | ErrorKind::InvalidOperator
                | ErrorKind::ConsecutiveOperators
                | ErrorKind::UnsupportedFunction
                | ErrorKind::InvalidToken
                | ErrorKind::UnexpectedToken
                | ErrorKind::UnexpectedEnd
        )
    }
}

/// Error value returned by every fallible operation of the crate.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct CalcError {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: Option<String>,
    /// byte offset into the source text, when the error points at a token
    pub offset: Option<usize>,
}

impl CalcError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        CalcError {
            kind,
            message: message.into(),
            detail: None,
            offset: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// error for a non-finite number; the sign goes into `detail`
    pub fn non_finite(value: f64, context: &str) -> Self {
        if value.is_nan() {
            CalcError::new(
                ErrorKind::UndefinedResult,
                format!("{} is undefined (not a number)", context),
            )
        } else {
            let sign = if value > 0.0 { "+∞" } else { "-∞" };
            CalcError::new(ErrorKind::InfiniteResult, format!("{} is infinite", context))
                .with_detail(sign)
        }
    }

    /// +1.0 / -1.0 for an `InfiniteResult` error, `None` otherwise
    pub fn infinity_sign(&self) -> Option<f64> {
        if self.kind != ErrorKind::InfiniteResult {
            return None;
        }
        match self.detail.as_deref() {
            Some("+∞") => Some(1.0),
            Some("-∞") => Some(-1.0),
            _ => None,
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
