//! # Precision engine
//!
//! Renders a number (or an expression, evaluated first) in several notations at once:
//! fixed decimals, scientific, engineering and, when the value is a simple fraction,
//! as `n/d`. All renderings are deterministic functions of the value and the
//! settings, the same input always gives byte-identical strings.
//!
//! Values that are NaN or infinite are never printed; they go through the error
//! policy of the settings instead.
use crate::errors::{CalcError, CalcResult, ErrorKind};
use crate::formatting::fractions::to_fraction;
use crate::formatting::precision_settings::{ErrorPolicy, PrecisionSettings};
use crate::symbolic::evaluator::{Scope, evaluate_str};
use itertools::Itertools;
use log::{debug, warn};
use std::fmt;

/// digits after the point in scientific and engineering mantissas
pub const MANTISSA_DIGITS: usize = 6;

/// What to format: a ready number or an expression to evaluate first.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Value(f64),
    Expression(String),
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Value(value)
    }
}

impl From<&str> for Quantity {
    fn from(text: &str) -> Self {
        Quantity::Expression(text.to_string())
    }
}

impl From<String> for Quantity {
    fn from(text: String) -> Self {
        Quantity::Expression(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionResult {
    pub value: f64,
    pub fixed: String,
    pub scientific: String,
    pub engineering: String,
    pub fraction: Option<String>,
    pub significant_digits: usize,
    /// the rendering the settings prefer: scientific or fixed
    pub display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendering {
    Value(PrecisionResult),
    /// graceful policy: the failure as data
    Failure { kind: ErrorKind, message: String },
    /// silent policy
    Placeholder,
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rendering::Value(result) => write!(f, "{}", result.display),
            Rendering::Failure { message, .. } => write!(f, "{}", message),
            Rendering::Placeholder => write!(f, "Error"),
        }
    }
}

// Rust prints "1.5e3"/"1.5e-3"; we want an explicit sign on the exponent
fn split_exponential(value: f64, digits: usize) -> (String, i32) {
    let text = format!("{:.*e}", digits, value);
    match text.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse::<i32>().unwrap_or(0)),
        None => (text, 0),
    }
}

fn signed_exponent(exp: i32) -> String {
    if exp < 0 {
        format!("e-{}", -exp)
    } else {
        format!("e+{}", exp)
    }
}

/// `value` with `digits` significant figures, the way JavaScript's `toPrecision` does:
/// exponential form when the exponent is below -6 or not smaller than `digits`.
pub fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }
    let (mantissa, exp) = split_exponential(value, digits - 1);
    if exp < -6 || exp >= digits as i32 {
        format!("{}{}", mantissa, signed_exponent(exp))
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        format!("{:.*}", decimals, value)
    }
}

/// `1234.5 -> "1.234500e+3"`
pub fn to_scientific(value: f64) -> String {
    if value == 0.0 {
        return format!("{:.*}{}", MANTISSA_DIGITS, 0.0, signed_exponent(0));
    }
    let (mantissa, exp) = split_exponential(value, MANTISSA_DIGITS);
    format!("{}{}", mantissa, signed_exponent(exp))
}

/// exponent forced to a multiple of three: `12345 -> "12.345000e+3"`
pub fn to_engineering(value: f64) -> String {
    if value == 0.0 {
        return to_scientific(0.0);
    }
    let (_, exp) = split_exponential(value, MANTISSA_DIGITS);
    let eng_exp = exp.div_euclid(3) * 3;
    let mantissa = value / 10f64.powi(eng_exp);
    format!("{:.*}{}", MANTISSA_DIGITS, mantissa, signed_exponent(eng_exp))
}

// "1234567" -> "1,234,567"
fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let head = chars.len() % 3;
    let mut groups: Vec<String> = Vec::new();
    if head > 0 {
        groups.push(chars[..head].iter().collect());
    }
    for chunk in &chars[head..].iter().chunks(3) {
        groups.push(chunk.collect());
    }
    groups.iter().join(",")
}

/// `x` rounded to the nearest integer when it is only a few ulps away, so that
/// 0.29 * 100 = 28.999999999999996 floors to 29
fn snap_to_integer(x: f64) -> f64 {
    let nearest = x.round();
    if (x - nearest).abs() <= 4.0 * f64::EPSILON * x.abs().max(1.0) {
        nearest
    } else {
        x
    }
}

/// fixed notation with the settings' decimal places, rounding mode and separators
pub fn to_fixed(value: f64, settings: &PrecisionSettings) -> String {
    let places = settings.places();
    let factor = 10f64.powi(places as i32);
    let scaled = snap_to_integer(value * factor);
    let mut rounded = if scaled.is_finite() {
        settings.rounding.apply(scaled) / factor
    } else {
        value
    };
    if rounded == 0.0 {
        // no "-0.00"
        rounded = 0.0;
    }
    let text = format!("{:.*}", places, rounded);
    if !settings.thousands_separator {
        return text;
    }
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
        }
        None => format!("{}{}", sign, group_thousands(unsigned)),
    }
}

/// Counts significant digits of a decimal string: sign, separators and the point
/// are dropped, then leading zeros are stripped.
pub fn count_significant_digits(text: &str) -> usize {
    let unsigned = text.trim().trim_start_matches(['-', '+']).replace(',', "");
    let digits: String = match unsigned.split_once('.') {
        Some((int_part, frac_part)) if !frac_part.is_empty() => {
            format!("{}{}", int_part, frac_part)
        }
        Some((int_part, _)) => int_part.to_string(),
        None => unsigned,
    };
    digits.trim_start_matches('0').len()
}

/// significant digits of the shortest decimal form of `value`
pub fn significant_digits(value: f64) -> usize {
    count_significant_digits(&format!("{}", value.abs()))
}

/// Renders a finite value in every notation. Non-finite values are an error.
pub fn format_value(value: f64, settings: &PrecisionSettings) -> CalcResult<PrecisionResult> {
    if !value.is_finite() {
        return Err(CalcError::non_finite(value, "value"));
    }
    let fixed = to_fixed(value, settings);
    let scientific = to_scientific(value);
    let display = if settings.scientific_notation {
        scientific.clone()
    } else {
        fixed.clone()
    };
    Ok(PrecisionResult {
        value,
        fixed,
        scientific,
        engineering: to_engineering(value),
        fraction: to_fraction(value),
        significant_digits: significant_digits(value),
        display,
    })
}

fn resolve(quantity: &Quantity) -> CalcResult<f64> {
    match quantity {
        Quantity::Value(value) => Ok(*value),
        Quantity::Expression(text) => evaluate_str(text, &Scope::new()),
    }
}

/// Formats a value or an expression under `settings`.
///
/// Failures follow `settings.error_policy`: `strict` returns the error, `graceful`
/// returns [`Rendering::Failure`], `silent` returns [`Rendering::Placeholder`].
///
/// # Examples
/// ```
/// use RustedMathCore::formatting::precision::{format_with_precision, Rendering};
/// use RustedMathCore::formatting::precision_settings::PrecisionSettings;
/// let settings = PrecisionSettings::default().with_decimal_places(2);
/// match format_with_precision("1/4 + 2", &settings).unwrap() {
///     Rendering::Value(result) => {
///         assert_eq!(result.fixed, "2.25");
///         assert_eq!(result.fraction.as_deref(), Some("9/4"));
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn format_with_precision(
    input: impl Into<Quantity>,
    settings: &PrecisionSettings,
) -> CalcResult<Rendering> {
    let quantity = input.into();
    let outcome = resolve(&quantity).and_then(|value| format_value(value, settings));
    match outcome {
        Ok(result) => {
            debug!("{:?} rendered as {}", quantity, result.display);
            Ok(Rendering::Value(result))
        }
        Err(e) => {
            warn!("formatting {:?} failed: {}", quantity, e);
            match settings.error_policy {
                ErrorPolicy::Strict => Err(e),
                ErrorPolicy::Graceful => Ok(Rendering::Failure {
                    kind: e.kind,
                    message: e.message,
                }),
                ErrorPolicy::Silent => Ok(Rendering::Placeholder),
            }
        }
    }
}
