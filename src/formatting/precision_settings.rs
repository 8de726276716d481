//! Precision settings: how many decimals, how to round, which notation, and what to
//! do when a value cannot be rendered.
//!
//! Settings are plain values passed to every formatting call. A host that wants a
//! process-wide default shares them through [`SharedSettings`]: readers take a
//! cheap `Arc` snapshot, writers replace the whole record at once.
use serde::Deserialize;
use std::sync::{Arc, PoisonError, RwLock};
use strum_macros::{Display, EnumIter, EnumString};

pub const MAX_DECIMAL_PLACES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// half away from zero
    #[default]
    Round,
    Floor,
    Ceil,
    Truncate,
}

impl RoundingMode {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            RoundingMode::Round => x.round(),
            RoundingMode::Floor => x.floor(),
            RoundingMode::Ceil => x.ceil(),
            RoundingMode::Truncate => x.trunc(),
        }
    }
}

/// what `format_with_precision` does when the value can't be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// return the error to the caller
    Strict,
    /// return a structured failure carrying the message
    #[default]
    Graceful,
    /// return the generic "Error" placeholder
    Silent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrecisionSettings {
    pub decimal_places: usize,
    pub rounding: RoundingMode,
    pub scientific_notation: bool,
    pub thousands_separator: bool,
    pub error_policy: ErrorPolicy,
}

impl Default for PrecisionSettings {
    fn default() -> Self {
        PrecisionSettings {
            decimal_places: 6,
            rounding: RoundingMode::Round,
            scientific_notation: false,
            thousands_separator: false,
            error_policy: ErrorPolicy::Graceful,
        }
    }
}

impl PrecisionSettings {
    pub fn with_decimal_places(mut self, decimal_places: usize) -> Self {
        self.decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_scientific_notation(mut self, on: bool) -> Self {
        self.scientific_notation = on;
        self
    }

    pub fn with_thousands_separator(mut self, on: bool) -> Self {
        self.thousands_separator = on;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// decimal places clamped to what f64 formatting can honour
    pub fn places(&self) -> usize {
        self.decimal_places.min(MAX_DECIMAL_PLACES)
    }
}

/// Read-mostly handle to the process-wide default settings.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<Arc<PrecisionSettings>>>,
}

impl SharedSettings {
    pub fn new(settings: PrecisionSettings) -> Self {
        SharedSettings {
            inner: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    /// current record; later replacements don't affect the returned snapshot
    pub fn snapshot(&self) -> Arc<PrecisionSettings> {
        // the lock only ever guards an Arc swap, a poisoned value is still whole
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn replace(&self, settings: PrecisionSettings) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(settings);
    }
}
