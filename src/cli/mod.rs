//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod asset;
pub mod expense;
pub mod income;
pub mod report;
pub mod settings;

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;

pub use asset::{handle_asset_command, AssetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};

/// Parse an amount argument; anything malformed counts as zero
pub fn parse_amount_or_zero(input: &str) -> Money {
    Money::parse(input).unwrap_or_default()
}

/// Parse a number argument; anything malformed or non-finite counts as zero
pub fn parse_number_or_zero(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to `today`
pub fn parse_date_or(input: Option<&str>, today: NaiveDate) -> FinanceResult<NaiveDate> {
    match input {
        None => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            FinanceError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
    }
}

/// Parse an optional `YYYY-MM` month argument into a day of that month
pub fn parse_month_or(input: Option<&str>, today: NaiveDate) -> FinanceResult<NaiveDate> {
    match input {
        None => Ok(today),
        Some(s) => NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").map_err(
            |_| FinanceError::Validation(format!("Invalid month '{}', expected YYYY-MM", s)),
        ),
    }
}
