//! Expense display formatting

use super::report::truncate;
use crate::models::{Currency, Expense, ExchangeRate};

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense) -> String {
    let recurring = match expense.frequency {
        Some(freq) if expense.is_recurring => format!(" ↻ {}", freq),
        _ => String::new(),
    };

    format!(
        "{}  {}  {:<10} {:>14}  {}{}",
        expense.id,
        expense.date.format("%Y-%m-%d"),
        expense.category.label(),
        expense.amount_etb.format_in(Currency::Etb),
        truncate(expense.note_or_default(), 24),
        recurring
    )
}

/// Format a list of expenses
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<10} {:>14}  {}\n",
        "ID", "Date", "Category", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense));
        output.push('\n');
    }

    output
}

/// Format one expense with its USD equivalent
pub fn format_expense_details(expense: &Expense, rate: ExchangeRate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", expense.id));
    output.push_str(&format!("Date:      {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:    {} ({})\n",
        expense.amount_etb.format_in(Currency::Etb),
        rate.etb_to_usd(expense.amount_etb).format_in(Currency::Usd)
    ));
    output.push_str(&format!("Category:  {}\n", expense.category.label()));
    if let (true, Some(freq)) = (expense.is_recurring, expense.frequency) {
        output.push_str(&format!("Recurring: {}\n", freq));
    }
    if let Some(note) = &expense.note {
        output.push_str(&format!("Note:      {}\n", note));
    }

    output
}
