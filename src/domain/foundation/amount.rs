//! Currency amount value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A strictly positive, finite currency amount in dollars.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyAmount(f64);

impl CurrencyAmount {
    /// Creates an amount, rejecting zero, negative, and non-finite values.
    pub fn try_new(field: &str, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format(field, "amount is not a finite number"));
        }
        if value <= 0.0 {
            return Err(ValidationError::not_positive(field, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw dollar value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

/// Formats a number with comma thousands separators and at most three
/// fraction digits, trailing zeros dropped: `450000` → `450,000`,
/// `1234.5` → `1,234.5`.
pub fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let abs = value.abs();

    let mut whole = abs.trunc() as u64;
    let mut millis = ((abs - abs.trunc()) * 1000.0).round() as u64;
    if millis == 1000 {
        whole += 1;
        millis = 0;
    }

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if millis > 0 {
        let fraction = format!("{:03}", millis);
        grouped.push('.');
        grouped.push_str(fraction.trim_end_matches('0'));
    }

    if negative && (whole > 0 || millis > 0) {
        grouped.insert(0, '-');
    }
    grouped
}
