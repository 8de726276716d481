//! different utility modules used throughout the project
/// terminal and file logging on top of simplelog, log file housekeeping
pub mod logger;
/// TOML configuration of precision, limits, linear algebra and logging
///
///# Example
/// ```
/// use RustedMathCore::Utils::config::CoreConfig;
/// let config = CoreConfig::from_toml_str("[precision]\ndecimal_places = 2").unwrap();
/// assert_eq!(config.precision.decimal_places, 2);
/// assert_eq!(config.limits.delta, 1e-7);
/// ```
pub mod config;
