//! Reports module for NomadFinance
//!
//! Derived aggregates over the ledger: the monthly overview, spending
//! analysis, the per-day expense grouping and the income/asset summary.
//! Everything here is a pure function of the data passed in and is
//! recomputed on every call.

pub mod activity;
pub mod holdings;
pub mod overview;
pub mod spending;

use chrono::{Datelike, NaiveDate};

pub use activity::{DayGroup, ExpenseActivity};
pub use holdings::HoldingsSummary;
pub use overview::{ForecastBand, MonthlyOverview};
pub use spending::{CategoryTotal, SpendingReport, TrendPoint, TrendWindow};

/// Whether `date` falls in the same calendar month and year as `reference`
pub fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Items whose date falls in the calendar month of `reference`
pub fn in_month<T, F>(items: &[T], reference: NaiveDate, date_of: F) -> Vec<&T>
where
    F: Fn(&T) -> NaiveDate,
{
    items
        .iter()
        .filter(|item| same_month(date_of(item), reference))
        .collect()
}
