//! Report CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::parse_month_or;
use crate::error::{FinanceError, FinanceResult};
use crate::reports::{HoldingsSummary, MonthlyOverview, SpendingReport, TrendWindow};
use crate::state::AppState;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Monthly overview: spent, earned, saved
    Overview {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Spending by category and recent trend
    Spending {
        /// Trend window: week or month
        #[arg(short, long, default_value = "week")]
        window: String,
    },

    /// Income and asset summary
    Income,
}

/// Handle a report command
pub fn handle_report_command(
    state: &AppState,
    cmd: ReportCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    match cmd {
        ReportCommands::Overview { month } => {
            let month = parse_month_or(month.as_deref(), today)?;
            let report =
                MonthlyOverview::generate(state.expenses(), state.incomes(), state.settings(), month);
            print!("{}", report.format_terminal());
        }

        ReportCommands::Spending { window } => {
            let window = TrendWindow::parse(&window).ok_or_else(|| {
                FinanceError::Validation(format!("Unknown window '{}', use week or month", window))
            })?;
            let report = SpendingReport::generate(state.expenses(), window, today);
            print!("{}", report.format_terminal());
        }

        ReportCommands::Income => {
            let report = HoldingsSummary::generate(state.incomes(), state.assets());
            print!("{}", report.format_terminal());
        }
    }

    Ok(())
}
