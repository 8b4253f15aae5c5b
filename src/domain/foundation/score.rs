//! Compliance score value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// How well a decision adheres to the SOP, between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplianceScore(u8);

impl ComplianceScore {
    /// Zero compliance, reported by the degraded result.
    pub const ZERO: Self = Self(0);

    /// Converts a model-reported score, which may be fractional or out of bounds.
    ///
    /// Rounds to the nearest integer and clamps into [0, 100]. Non-finite
    /// input is rejected.
    pub fn from_reported(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format(
                "complianceScore",
                "score is not a finite number",
            ));
        }
        Ok(Self(value.round().clamp(0.0, 100.0) as u8))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for ComplianceScore {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for ComplianceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}
