//! Display formatting for terminal output
//!
//! Provides utilities for formatting the ledger for terminal display:
//! expense, income and asset lists, the status screen and shared report
//! helpers.

pub mod expense;
pub mod holdings;
pub mod report;
pub mod status;

pub use expense::{format_expense_details, format_expense_list};
pub use holdings::{format_asset_list, format_income_list};
pub use status::{format_settings, format_status};
