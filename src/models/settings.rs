//! Per-user settings record
//!
//! One record per user: the ETB/USD rate, the monthly savings goal, the
//! recurring-expense toggle and the display name.

use serde::{Deserialize, Serialize};

use super::currency::ExchangeRate;
use super::money::Money;

pub const DEFAULT_EXCHANGE_RATE: f64 = 180.0;
pub const DEFAULT_USER_NAME: &str = "Freelancer";
pub const DEMO_USER_NAME: &str = "Demo User";

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// ETB per 1 USD
    pub exchange_rate: f64,

    #[serde(rename = "savingsGoalUSD")]
    pub savings_goal_usd: Money,

    pub recurring_enabled: bool,

    pub user_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            savings_goal_usd: Money::from_units_cents(2000, 0),
            recurring_enabled: true,
            user_name: DEFAULT_USER_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Defaults with a specific display name
    pub fn named(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            ..Self::default()
        }
    }

    pub fn rate(&self) -> ExchangeRate {
        ExchangeRate::new(self.exchange_rate)
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(rate) = patch.exchange_rate {
            self.exchange_rate = rate;
        }
        if let Some(goal) = patch.savings_goal_usd {
            self.savings_goal_usd = goal;
        }
        if let Some(enabled) = patch.recurring_enabled {
            self.recurring_enabled = enabled;
        }
        if let Some(name) = &patch.user_name {
            self.user_name = name.clone();
        }
    }

    /// A patch that sets every field to this record's values
    pub fn as_patch(&self) -> SettingsPatch {
        SettingsPatch {
            exchange_rate: Some(self.exchange_rate),
            savings_goal_usd: Some(self.savings_goal_usd),
            recurring_enabled: Some(self.recurring_enabled),
            user_name: Some(self.user_name.clone()),
        }
    }
}

/// Partial settings update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub exchange_rate: Option<f64>,
    pub savings_goal_usd: Option<Money>,
    pub recurring_enabled: Option<bool>,
    pub user_name: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.exchange_rate.is_none()
            && self.savings_goal_usd.is_none()
            && self.recurring_enabled.is_none()
            && self.user_name.is_none()
    }
}
