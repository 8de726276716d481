//! TOML configuration: every section and key is optional.
//!
//! ```toml
//! [precision]
//! decimal_places = 4
//! rounding = "floor"
//! error_policy = "strict"
//!
//! [limits]
//! delta = 1e-6
//!
//! [linalg]
//! singular_epsilon = 1e-12
//!
//! [logging]
//! level = "debug"
//! file = "calc.log"
//! ```
use crate::errors::{CalcError, CalcResult, ErrorKind};
use crate::formatting::precision_settings::PrecisionSettings;
use crate::numerical::limits::LimitSettings;
use crate::somelinalg::matrix::LinalgSettings;
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub precision: PrecisionSettings,
    pub limits: LimitSettings,
    pub linalg: LinalgSettings,
    pub logging: LoggingConfig,
}

impl CoreConfig {
    pub fn from_toml_str(text: &str) -> CalcResult<CoreConfig> {
        let config: CoreConfig = toml::from_str(text).map_err(|e| {
            CalcError::new(ErrorKind::Config, format!("invalid configuration: {}", e.message()))
        })?;
        config.check()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> CalcResult<CoreConfig> {
        let text = fs::read_to_string(path).map_err(|e| {
            CalcError::new(
                ErrorKind::Config,
                format!("cannot read {}: {}", path.display(), e),
            )
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("configuration loaded from {}", path.display());
        Ok(config)
    }

    fn check(&self) -> CalcResult<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(CalcError::new(
                    ErrorKind::Config,
                    format!("{} must be a positive number, got {}", name, value),
                ))
            }
        };
        positive("limits.delta", self.limits.delta)?;
        positive("linalg.singular_epsilon", self.linalg.singular_epsilon)?;
        positive("linalg.condition_threshold", self.linalg.condition_threshold)?;
        Ok(())
    }
}
