//! Asset model
//!
//! Assets are USD-valued holdings. Money lent out is a receivable (`Lent`),
//! money borrowed is a liability (`Loan`) and always carries a negative amount.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AssetId;
use super::money::Money;

/// Type of holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// Cash on hand
    Cash,
    /// A physical item of value
    Item,
    /// Money lent to someone (receivable)
    Lent,
    /// Money owed to someone (payable, liability)
    Loan,
}

impl AssetType {
    pub const ALL: [AssetType; 4] = [Self::Cash, Self::Item, Self::Lent, Self::Loan];

    /// Returns true if holdings of this type are debts
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::Loan)
    }

    /// Position in the asset list: cash, items, receivables, then liabilities
    pub fn sort_order(&self) -> u8 {
        match self {
            Self::Cash => 1,
            Self::Item => 2,
            Self::Lent => 3,
            Self::Loan => 4,
        }
    }

    /// Apply the sign convention for this type to a raw amount
    pub fn signed(&self, amount: Money) -> Money {
        if self.is_liability() {
            -amount.abs()
        } else {
            amount.abs()
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "item" => Some(Self::Item),
            "lent" | "receivable" => Some(Self::Lent),
            "loan" | "payable" | "liability" | "debt" => Some(Self::Loan),
            _ => None,
        }
    }
}

impl Default for AssetType {
    fn default() -> Self {
        Self::Cash
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Item => write!(f, "Item"),
            Self::Lent => write!(f, "Lent"),
            Self::Loan => write!(f, "Loan"),
        }
    }
}

/// Validation errors for assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetValidationError {
    EmptyName,
}

impl fmt::Display for AssetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Asset name cannot be empty"),
        }
    }
}

impl std::error::Error for AssetValidationError {}

/// A held asset or liability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,

    pub name: String,

    /// Signed amount; negative iff `asset_type` is a liability
    #[serde(rename = "amountUSD")]
    pub amount_usd: Money,

    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

impl Asset {
    pub fn from_draft(id: AssetId, draft: NewAsset) -> Self {
        Self {
            id,
            name: draft.name,
            amount_usd: draft.amount_usd,
            asset_type: draft.asset_type,
        }
    }

    pub fn is_liability(&self) -> bool {
        self.asset_type.is_liability()
    }
}

/// An asset before it has an identifier
///
/// The constructor applies the sign convention, so every draft already
/// satisfies the liability invariant regardless of the sign it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub name: String,
    pub amount_usd: Money,
    pub asset_type: AssetType,
}

impl NewAsset {
    pub fn new(name: impl Into<String>, amount_usd: Money, asset_type: AssetType) -> Self {
        Self {
            name: name.into().trim().to_string(),
            amount_usd: asset_type.signed(amount_usd),
            asset_type,
        }
    }

    pub fn validate(&self) -> Result<(), AssetValidationError> {
        if self.name.is_empty() {
            return Err(AssetValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Sort assets by type order, keeping insertion order within a type
pub fn sort_by_type(assets: &mut [Asset]) {
    assets.sort_by_key(|a| a.asset_type.sort_order());
}
