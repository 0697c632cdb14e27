//! Measurement units for wall lengths and ceiling heights.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::CM_PER_INCH;

#[cfg(test)]
#[path = "units_test.rs"]
mod units_test;

/// Length unit shown next to every measurement. Process-wide in the host form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Cm,
    In,
}

impl Unit {
    /// Multiplier that converts a value in `self` into `to`.
    #[must_use]
    pub fn factor_to(self, to: Unit) -> f64 {
        match (self, to) {
            (Self::Cm, Self::In) => 1.0 / CM_PER_INCH,
            (Self::In, Self::Cm) => CM_PER_INCH,
            _ => 1.0,
        }
    }

    /// The other unit.
    #[must_use]
    pub fn toggled(self) -> Unit {
        match self {
            Self::Cm => Self::In,
            Self::In => Self::Cm,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cm => write!(f, "cm"),
            Self::In => write!(f, "in"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cm" => Ok(Self::Cm),
            "in" | "inch" | "inches" => Ok(Self::In),
            other => Err(format!("unknown unit: {other}")),
        }
    }
}

/// Parse a free-text length. Empty or non-numeric text counts as zero.
#[must_use]
pub fn parse_length(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Convert a free-text length between units, formatted with two decimals.
///
/// Returns `None` when `raw` is not a number; callers keep the text as-is.
/// Repeated toggling accumulates rounding error.
#[must_use]
pub fn convert_length(raw: &str, from: Unit, to: Unit) -> Option<String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(format!("{:.2}", value * from.factor_to(to))),
        _ => None,
    }
}
