//! # Currency
//!
//! One currency per deployment, chosen by `PAYMENT_CURRENCY`. Requests quote
//! amounts in major units; storage and the gateway use minor units.

use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Largest amount, in minor units, the gateway accepts (eight digits)
pub const MAX_MINOR_AMOUNT: i64 = 99_999_999;

/// Currencies a deployment can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    GBP,
    EUR,
    USD,
    /// Zero-decimal: one yen is one minor unit
    JPY,
}

impl Currency {
    /// Lower-case ISO 4217 code, as the gateway expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::GBP => "gbp",
            Currency::EUR => "eur",
            Currency::USD => "usd",
            Currency::JPY => "jpy",
        }
    }

    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Major-unit decimal to minor units, rounded to the nearest unit.
    ///
    /// `None` when the result is not a finite value within
    /// `0..=MAX_MINOR_AMOUNT`; the cast never saturates.
    pub fn to_minor_units(&self, amount: f64) -> Option<i64> {
        let scaled = (amount * 10_f64.powi(self.decimal_places() as i32)).round();
        if !scaled.is_finite() || scaled < 0.0 || scaled > MAX_MINOR_AMOUNT as f64 {
            return None;
        }
        Some(scaled as i64)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::GBP
    }
}

impl FromStr for Currency {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gbp" => Ok(Currency::GBP),
            "eur" => Ok(Currency::EUR),
            "usd" => Ok(Currency::USD),
            "jpy" => Ok(Currency::JPY),
            other => Err(PaymentError::Configuration(format!(
                "Unsupported currency: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}
