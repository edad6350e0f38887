//! Income model
//!
//! Income is recorded in USD and classified as stable (recurring salary,
//! retainers) or variable (one-off projects).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::IncomeId;
use super::money::Money;

/// Income classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeKind {
    /// Recurring, stable income
    Stable,
    /// One-off, variable income
    Variable,
}

impl IncomeKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "stable" | "recurring" => Some(Self::Stable),
            "variable" | "one-off" | "oneoff" => Some(Self::Variable),
            _ => None,
        }
    }
}

impl Default for IncomeKind {
    fn default() -> Self {
        Self::Variable
    }
}

impl fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => write!(f, "Stable"),
            Self::Variable => write!(f, "Variable"),
        }
    }
}

/// Validation errors for incomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NegativeAmount,
    EmptySource,
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Income amount cannot be negative"),
            Self::EmptySource => write!(f, "Income source cannot be empty"),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// A recorded income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: IncomeId,

    #[serde(rename = "amountUSD")]
    pub amount_usd: Money,

    pub source: String,

    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub kind: IncomeKind,
}

impl Income {
    pub fn from_draft(id: IncomeId, draft: NewIncome) -> Self {
        Self {
            id,
            amount_usd: draft.amount_usd,
            source: draft.source,
            date: draft.date,
            kind: draft.kind,
        }
    }

    pub fn is_stable(&self) -> bool {
        self.kind == IncomeKind::Stable
    }
}

/// An income before it has an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncome {
    pub amount_usd: Money,
    pub source: String,
    pub date: NaiveDate,
    pub kind: IncomeKind,
}

impl NewIncome {
    pub fn new(
        amount_usd: Money,
        source: impl Into<String>,
        date: NaiveDate,
        kind: IncomeKind,
    ) -> Self {
        Self {
            amount_usd,
            source: source.into().trim().to_string(),
            date,
            kind,
        }
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.amount_usd.is_negative() {
            return Err(IncomeValidationError::NegativeAmount);
        }
        if self.source.is_empty() {
            return Err(IncomeValidationError::EmptySource);
        }
        Ok(())
    }
}
