/// decimal places, rounding mode, notation and error policy; process-wide shared handle
///
///# Example
/// ```
/// use RustedMathCore::formatting::precision_settings::{PrecisionSettings, RoundingMode, SharedSettings};
/// let shared = SharedSettings::new(PrecisionSettings::default());
/// shared.replace(PrecisionSettings::default().with_rounding(RoundingMode::Floor));
/// assert_eq!(shared.snapshot().rounding, RoundingMode::Floor);
/// ```
pub mod precision_settings;
///______________________________________________________________________________________________
/// # Precision engine
/// fixed, scientific, engineering and fraction renderings of a value or an expression
///
///# Example
/// ```
/// use RustedMathCore::formatting::precision::{format_value, to_precision};
/// use RustedMathCore::formatting::precision_settings::PrecisionSettings;
/// let settings = PrecisionSettings::default().with_decimal_places(2).with_thousands_separator(true);
/// let result = format_value(1234.5678, &settings).unwrap();
/// assert_eq!(result.fixed, "1,234.57");
/// assert_eq!(result.scientific, "1.234568e+3");
/// assert_eq!(to_precision(0.9999999999, 7), "1.000000");
/// ```
pub mod precision;
///______________________________________________________________________________________________
/// table lookup of simple fractions
pub mod fractions;
