//! Wire rows for the data service
//!
//! Tables use snake_case columns and carry amounts as major-unit numbers.
//! Rows are translated to and from the in-memory models here and nowhere else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    Asset, AssetId, AssetType, Category, Expense, ExpenseId, Frequency, Income, IncomeId,
    IncomeKind, Money, Settings,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub amount_etb: f64,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub note: Option<String>,
}

impl ExpenseRow {
    /// Row for an insert; the service assigns the id
    pub fn for_insert(expense: &Expense, user_id: &str) -> Self {
        Self {
            id: None,
            user_id: Some(user_id.to_string()),
            amount_etb: expense.amount_etb.to_major(),
            category: expense.category,
            date: expense.date,
            is_recurring: expense.is_recurring,
            frequency: expense.frequency,
            note: expense.note.clone(),
        }
    }

    pub fn into_model(self) -> Expense {
        Expense {
            id: self.id.map(ExpenseId::from_uuid).unwrap_or_default(),
            amount_etb: Money::from_major(self.amount_etb),
            category: self.category,
            date: self.date,
            is_recurring: self.is_recurring,
            frequency: self.frequency,
            note: self.note,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub amount_usd: f64,
    pub source: String,
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: IncomeKind,
}

impl IncomeRow {
    pub fn for_insert(income: &Income, user_id: &str) -> Self {
        Self {
            id: None,
            user_id: Some(user_id.to_string()),
            amount_usd: income.amount_usd.to_major(),
            source: income.source.clone(),
            date: income.date,
            kind: income.kind,
        }
    }

    pub fn into_model(self) -> Income {
        Income {
            id: self.id.map(IncomeId::from_uuid).unwrap_or_default(),
            amount_usd: Money::from_major(self.amount_usd),
            source: self.source,
            date: self.date,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub amount_usd: f64,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

impl AssetRow {
    pub fn for_insert(asset: &Asset, user_id: &str) -> Self {
        Self {
            id: None,
            user_id: Some(user_id.to_string()),
            name: asset.name.clone(),
            amount_usd: asset.amount_usd.to_major(),
            asset_type: asset.asset_type,
        }
    }

    /// Convert to the model, re-applying the liability sign convention
    pub fn into_model(self) -> Asset {
        Asset {
            id: self.id.map(AssetId::from_uuid).unwrap_or_default(),
            name: self.name,
            amount_usd: self.asset_type.signed(Money::from_major(self.amount_usd)),
            asset_type: self.asset_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsRow {
    pub user_id: String,
    pub exchange_rate: f64,
    pub savings_goal_usd: f64,
    pub recurring_enabled: bool,
    pub user_name: String,
}

impl SettingsRow {
    pub fn from_model(settings: &Settings, user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            exchange_rate: settings.exchange_rate,
            savings_goal_usd: settings.savings_goal_usd.to_major(),
            recurring_enabled: settings.recurring_enabled,
            user_name: settings.user_name.clone(),
        }
    }

    pub fn into_model(self) -> Settings {
        Settings {
            exchange_rate: self.exchange_rate,
            savings_goal_usd: Money::from_major(self.savings_goal_usd),
            recurring_enabled: self.recurring_enabled,
            user_name: self.user_name,
        }
    }
}
