//! The four user-owned collections held together

use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::expense::Expense;
use super::income::Income;
use super::settings::Settings;

/// Expenses, incomes, assets and settings of the active user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub settings: Settings,
}

impl Ledger {
    /// An empty ledger with default settings under the given display name
    pub fn empty_for(user_name: impl Into<String>) -> Self {
        Self {
            settings: Settings::named(user_name),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.incomes.is_empty() && self.assets.is_empty()
    }

    /// Drop every entry and restore default settings
    pub fn clear(&mut self) {
        self.expenses.clear();
        self.incomes.clear();
        self.assets.clear();
        self.settings = Settings::default();
    }
}
