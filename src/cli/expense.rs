//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{parse_amount_or_zero, parse_date_or};
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Currency, Frequency, NewExpense};
use crate::reports::ExpenseActivity;
use crate::services::ExpenseService;
use crate::state::AppState;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense in ETB
    Add {
        /// Amount in ETB (e.g., "450" or "1,200.50")
        amount: String,

        /// Category: food, transport, rent, internet, fun, coffee, item, other
        #[arg(short, long, default_value = "food")]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Mark as a recurring expense
        #[arg(short, long)]
        recurring: bool,

        /// Recurrence: daily, weekly or monthly
        #[arg(short, long, default_value = "monthly")]
        frequency: String,

        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Group by day instead of listing each expense
        #[arg(long)]
        by_day: bool,
    },

    /// Show one expense
    Show {
        /// Expense ID (full or short form)
        id: String,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        id: String,
    },
}

/// Handle an expense command
pub async fn handle_expense_command(
    state: &mut AppState,
    cmd: ExpenseCommands,
    today: NaiveDate,
) -> FinanceResult<()> {
    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            recurring,
            frequency,
            note,
        } => {
            let category = Category::parse(&category).ok_or_else(|| {
                FinanceError::Validation(format!("Unknown category '{}'", category))
            })?;
            let date = parse_date_or(date.as_deref(), today)?;

            let mut draft = NewExpense::new(parse_amount_or_zero(&amount), category, date);
            if recurring {
                let frequency = Frequency::parse(&frequency).ok_or_else(|| {
                    FinanceError::Validation(format!("Unknown frequency '{}'", frequency))
                })?;
                draft = draft.recurring(frequency);
            }
            if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
                draft = draft.with_note(note);
            }

            let expense = ExpenseService::new(state).add(draft).await?;
            println!(
                "Added expense {}: {} on {} ({})",
                expense.id,
                expense.amount_etb.format_in(Currency::Etb),
                expense.date.format("%Y-%m-%d"),
                expense.category.label()
            );
        }

        ExpenseCommands::List { limit, by_day } => {
            if by_day {
                print!(
                    "{}",
                    ExpenseActivity::generate(state.expenses(), today).format_terminal()
                );
            } else {
                let expenses = state.expenses();
                let shown = limit.map_or(expenses.len(), |l| l.min(expenses.len()));
                print!("{}", format_expense_list(&expenses[..shown]));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = state
                .expenses()
                .iter()
                .find(|e| e.id.matches_ref(&id))
                .ok_or_else(|| FinanceError::expense_not_found(&id))?;
            print!(
                "{}",
                format_expense_details(expense, state.settings().rate())
            );
        }

        ExpenseCommands::Delete { id } => {
            let mut service = ExpenseService::new(state);
            let target = service
                .find(&id)
                .map(|e| e.id)
                .ok_or_else(|| FinanceError::expense_not_found(&id))?;
            let removed = service.delete(target).await?;
            println!(
                "Deleted expense {} ({})",
                removed.id,
                removed.amount_etb.format_in(Currency::Etb)
            );
        }
    }

    Ok(())
}
