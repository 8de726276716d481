//! # Limit approximation
//!
//! Numerical limits by sampling the expression on both sides of the target point.
//! This is an estimate, not a proof: a function can agree at `t ± δ` and still have
//! no limit, and an oscillating function can fool it. The result is always a
//! human-readable string, the function never fails.
//!
//! * finite target `t`: samples at `t - δ` and `t + δ`; close samples are averaged
//!   and printed with 7 significant figures, equal-signed infinities print as `∞`/`-∞`,
//!   anything else is reported as a jump discontinuity with both one-sided values;
//! * `±∞`: one sample at `±1/δ`, a cheap proxy for the asymptotic behaviour.
use crate::errors::{CalcError, CalcResult, ErrorKind};
use crate::formatting::precision::to_precision;
use crate::symbolic::ast::Expr;
use crate::symbolic::evaluator::{Scope, evaluate};
use log::{debug, info};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// default half-width of the sampling window
pub const LIMIT_DELTA: f64 = 1e-7;
/// significant figures of the reported value
pub const LIMIT_DIGITS: usize = 7;
/// one-sided samples closer than this many deltas count as the same value
const AGREEMENT_FACTOR: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub delta: f64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        LimitSettings { delta: LIMIT_DELTA }
    }
}

/// the point the variable approaches
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Approach {
    Finite(f64),
    PositiveInfinity,
    NegativeInfinity,
}

impl From<f64> for Approach {
    fn from(value: f64) -> Self {
        if value == f64::INFINITY {
            Approach::PositiveInfinity
        } else if value == f64::NEG_INFINITY {
            Approach::NegativeInfinity
        } else {
            Approach::Finite(value)
        }
    }
}

impl FromStr for Approach {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();
        match text.as_str() {
            "+inf" | "inf" | "∞" | "+∞" | "infinity" => Ok(Approach::PositiveInfinity),
            "-inf" | "-∞" | "-infinity" => Ok(Approach::NegativeInfinity),
            _ => text
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Approach::Finite)
                .ok_or_else(|| {
                    CalcError::new(
                        ErrorKind::InvalidToken,
                        format!("'{}' is neither a number nor ±infinity", s),
                    )
                }),
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Approach::Finite(value) => write!(f, "{}", value),
            Approach::PositiveInfinity => write!(f, "∞"),
            Approach::NegativeInfinity => write!(f, "-∞"),
        }
    }
}

/// value of the expression at one sample point
#[derive(Debug, Clone, PartialEq)]
enum Sample {
    Finite(f64),
    /// sign of the infinity
    Infinite(f64),
    Failed(CalcError),
}

impl Sample {
    fn render(&self) -> String {
        match self {
            Sample::Finite(value) => to_precision(*value, LIMIT_DIGITS),
            Sample::Infinite(sign) => infinity_symbol(*sign).to_string(),
            Sample::Failed(e) => e.message.clone(),
        }
    }
}

fn infinity_symbol(sign: f64) -> &'static str {
    if sign > 0.0 { "∞" } else { "-∞" }
}

fn sample_at(ast: &Expr, variable: &str, point: f64) -> Sample {
    let scope = Scope::new().with(variable, point);
    let outcome: CalcResult<f64> = evaluate(ast, &scope);
    let sample = match outcome {
        Ok(value) => Sample::Finite(value),
        Err(e) => match e.infinity_sign() {
            Some(sign) => Sample::Infinite(sign),
            None => Sample::Failed(e),
        },
    };
    debug!("{} = {} -> {:?}", variable, point, sample);
    sample
}

fn finite_limit(ast: &Expr, variable: &str, target: f64, delta: f64) -> String {
    let left = sample_at(ast, variable, target - delta);
    let right = sample_at(ast, variable, target + delta);
    match (&left, &right) {
        (Sample::Failed(e), _) | (_, Sample::Failed(e)) => {
            format!("Limit could not be evaluated near {}: {}", target, e.message)
        }
        (Sample::Finite(l), Sample::Finite(r)) if (l - r).abs() < AGREEMENT_FACTOR * delta => {
            to_precision((l + r) / 2.0, LIMIT_DIGITS)
        }
        (Sample::Infinite(l), Sample::Infinite(r)) if l == r => infinity_symbol(*l).to_string(),
        _ => format!(
            "Limit does not exist (jump discontinuity): left → {}, right → {}",
            left.render(),
            right.render()
        ),
    }
}

fn infinite_limit(ast: &Expr, variable: &str, sign: f64, delta: f64) -> String {
    match sample_at(ast, variable, sign / delta) {
        Sample::Failed(e) => format!(
            "Limit could not be evaluated as {} → {}: {}",
            variable,
            infinity_symbol(sign),
            e.message
        ),
        sample => sample.render(),
    }
}

/// limit with the default sampling window
///
/// # Examples
/// ```
/// use RustedMathCore::numerical::limits::{limit, Approach};
/// use RustedMathCore::symbolic::parse_expr::parse;
/// let f = parse("sin(x)/x").unwrap();
/// assert_eq!(limit(&f, "x", Approach::Finite(0.0)), "1.000000");
/// ```
pub fn limit(ast: &Expr, variable: &str, approaching: Approach) -> String {
    limit_with(ast, variable, approaching, &LimitSettings::default())
}

pub fn limit_with(
    ast: &Expr,
    variable: &str,
    approaching: Approach,
    settings: &LimitSettings,
) -> String {
    let delta = settings.delta.abs();
    let result = match approaching {
        Approach::Finite(target) => finite_limit(ast, variable, target, delta),
        Approach::PositiveInfinity => infinite_limit(ast, variable, 1.0, delta),
        Approach::NegativeInfinity => infinite_limit(ast, variable, -1.0, delta),
    };
    info!("limit of {} as {} → {}: {}", ast, variable, approaching, result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parse_expr::parse;
    use approx::assert_relative_eq;

    fn lim(text: &str, approaching: Approach) -> String {
        limit(&parse(text).unwrap(), "x", approaching)
    }

    #[test]
    fn test_sinc_at_zero() {
        let result = lim("sin(x)/x", Approach::Finite(0.0));
        let value: f64 = result.parse().unwrap();
        assert_relative_eq!(value, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_continuous_point() {
        assert_eq!(lim("x^2", Approach::Finite(2.0)), "4.000000");
        assert_eq!(lim("3x + 1", Approach::Finite(-1.0)), "-2.000000");
    }

    #[test]
    fn test_removable_singularity() {
        let result = lim("(x^2 - 1)/(x - 1)", Approach::Finite(1.0));
        let value: f64 = result.parse().unwrap();
        assert_relative_eq!(value, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_jump_discontinuity() {
        let result = lim("abs(x)/x", Approach::Finite(0.0));
        assert!(result.contains("jump discontinuity"), "{}", result);
        assert!(result.contains("left → -1.000000"), "{}", result);
        assert!(result.contains("right → 1.000000"), "{}", result);
    }

    #[test]
    fn test_towards_infinity() {
        assert_eq!(lim("1/x", Approach::PositiveInfinity), "1.000000e-7");
        assert_eq!(lim("x^2", Approach::NegativeInfinity), "1.000000e+14");
        assert_eq!(lim("x^x", Approach::PositiveInfinity), "∞");
    }

    #[test]
    fn test_infinite_on_both_sides_of_a_finite_point() {
        assert_eq!(lim("10^(1/x^2)", Approach::Finite(0.0)), "∞");
        // the product overflows towards -∞ on both sides
        assert_eq!(lim("-1/x^2*10^300", Approach::Finite(0.0)), "-∞");
    }

    #[test]
    fn test_opposite_infinities_are_a_jump() {
        let result = lim("10^302/x", Approach::Finite(0.0));
        assert!(result.contains("jump discontinuity"), "{}", result);
        assert!(result.contains("left → -∞"), "{}", result);
        assert!(result.contains("right → ∞"), "{}", result);
    }

    #[test]
    fn test_failed_sample_is_reported() {
        let result = lim("ln(x)", Approach::Finite(0.0));
        assert!(result.starts_with("Limit could not be evaluated"), "{}", result);
        let undefined = lim("y + x", Approach::Finite(1.0));
        assert!(undefined.contains("y"), "{}", undefined);
    }

    #[test]
    fn test_custom_delta() {
        let settings = LimitSettings { delta: 1e-4 };
        let result = limit_with(&parse("x^2").unwrap(), "x", Approach::Finite(3.0), &settings);
        assert_eq!(result, "9.000000");
    }

    #[test]
    fn test_approach_parsing() {
        assert_eq!("inf".parse::<Approach>().unwrap(), Approach::PositiveInfinity);
        assert_eq!("+inf".parse::<Approach>().unwrap(), Approach::PositiveInfinity);
        assert_eq!("∞".parse::<Approach>().unwrap(), Approach::PositiveInfinity);
        assert_eq!("-∞".parse::<Approach>().unwrap(), Approach::NegativeInfinity);
        assert_eq!(" -INF ".parse::<Approach>().unwrap(), Approach::NegativeInfinity);
        assert_eq!("2.5".parse::<Approach>().unwrap(), Approach::Finite(2.5));
        assert_eq!(Approach::from(f64::NEG_INFINITY), Approach::NegativeInfinity);
        let err = "near".parse::<Approach>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }
}
