//! Currencies and the static exchange rate
//!
//! Expenses are recorded in ETB, incomes and assets in USD. A single
//! user-configured rate (ETB per 1 USD) converts between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// The two currencies the tracker works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar, income and asset currency
    Usd,
    /// Ethiopian birr, expense currency
    Etb,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Etb => write!(f, "ETB"),
        }
    }
}

/// ETB per 1 USD
///
/// A rate that is zero, negative or not finite is unusable; conversions
/// through it yield zero instead of dividing by it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub fn new(etb_per_usd: f64) -> Self {
        Self(etb_per_usd)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_usable(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Convert a major-unit ETB value to USD
    pub fn etb_to_usd_value(&self, etb: f64) -> f64 {
        if self.is_usable() {
            etb / self.0
        } else {
            0.0
        }
    }

    /// Convert a major-unit USD value to ETB
    pub fn usd_to_etb_value(&self, usd: f64) -> f64 {
        if self.is_usable() {
            usd * self.0
        } else {
            0.0
        }
    }

    /// Convert an ETB amount to USD, rounded to the cent
    pub fn etb_to_usd(&self, etb: Money) -> Money {
        Money::from_major(self.etb_to_usd_value(etb.to_major()))
    }

    /// Convert a USD amount to ETB, rounded to the cent
    pub fn usd_to_etb(&self, usd: Money) -> Money {
        Money::from_major(self.usd_to_etb_value(usd.to_major()))
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 USD = {} ETB", self.0)
    }
}
