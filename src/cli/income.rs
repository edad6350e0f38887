//! Income CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount_or_zero, parse_date_or};
use crate::display::format_income_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Currency, IncomeKind, NewIncome};
use crate::services::IncomeService;
use crate::state::AppState;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record an income in USD
    Add {
        /// Amount in USD (e.g., "1500" or "$1,500.00")
        amount: String,

        /// Where the money came from
        source: String,

        /// Stable (recurring salary, retainer) or variable
        #[arg(short, long, default_value = "variable")]
        kind: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List incomes, newest first
    List,

    /// Delete an income
    Delete {
        /// Income ID (full or short form)
        id: String,
    },
}

/// Handle an income command
pub async fn handle_income_command(
    state: &mut AppState,
    cmd: IncomeCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    match cmd {
        IncomeCommands::Add {
            amount,
            source,
            kind,
            date,
        } => {
            let kind = IncomeKind::parse(&kind).ok_or_else(|| {
                FinanceError::Validation(format!("Unknown income type '{}'", kind))
            })?;
            let date = parse_date_or(date.as_deref(), today)?;

            let income = IncomeService::new(state)
                .add(NewIncome::new(parse_amount_or_zero(&amount), source, date, kind))
                .await?;
            println!(
                "Added {} income {}: {} from {}",
                income.kind,
                income.id,
                income.amount_usd.format_in(Currency::Usd),
                income.source
            );
        }

        IncomeCommands::List => {
            let mut incomes = state.incomes().to_vec();
            incomes.sort_by(|a, b| b.date.cmp(&a.date));
            print!("{}", format_income_list(&incomes));
        }

        IncomeCommands::Delete { id } => {
            let mut service = IncomeService::new(state);
            let target = service
                .find(&id)
                .map(|i| i.id)
                .ok_or_else(|| FinanceError::income_not_found(&id))?;
            let removed = service.delete(target).await?;
            println!("Deleted income {} ({})", removed.id, removed.source);
        }
    }

    Ok(())
}
