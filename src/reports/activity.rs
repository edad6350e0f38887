//! Expense activity grouped by day

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::in_month;
use crate::models::{Category, Currency, Expense, Money};

/// All expenses recorded on one date
#[derive(Debug, Clone)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// Sum of the day's expenses, in ETB
    pub total: Money,
    /// Distinct categories, in first-seen order
    pub categories: Vec<Category>,
    pub expenses: Vec<Expense>,
}

/// Expenses grouped per day, newest day first
#[derive(Debug, Clone)]
pub struct ExpenseActivity {
    pub days: Vec<DayGroup>,
    /// Spent in the calendar month of the reference date, in ETB
    pub spent_this_month: Money,
}

impl ExpenseActivity {
    pub fn generate(expenses: &[Expense], today: NaiveDate) -> Self {
        Self {
            days: group_by_day(expenses),
            spent_this_month: in_month(expenses, today, |e| e.date)
                .into_iter()
                .map(|e| e.amount_etb)
                .sum(),
        }
    }

    /// The group for one date, if anything was spent that day
    pub fn day(&self, date: NaiveDate) -> Option<&DayGroup> {
        self.days.iter().find(|g| g.date == date)
    }

    /// Format the grouping for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = format!(
            "Spent this month: {}\n\n",
            self.spent_this_month.format_in(Currency::Etb)
        );
        if self.days.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        for group in &self.days {
            let labels: Vec<_> = group.categories.iter().map(|c| c.label()).collect();
            output.push_str(&format!(
                "{}  {:>14}  {}\n",
                group.date.format("%a %Y-%m-%d"),
                group.total.format_in(Currency::Etb),
                labels.join(", ")
            ));
        }
        output
    }
}

/// Group expenses by date, newest date first
pub fn group_by_day(expenses: &[Expense]) -> Vec<DayGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&Expense>> = BTreeMap::new();
    for expense in expenses {
        by_date.entry(expense.date).or_default().push(expense);
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, day)| {
            let mut categories = Vec::new();
            for expense in &day {
                if !categories.contains(&expense.category) {
                    categories.push(expense.category);
                }
            }
            DayGroup {
                date,
                total: day.iter().map(|e| e.amount_etb).sum(),
                categories,
                expenses: day.into_iter().cloned().collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewExpense};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn expense(amount: f64, category: Category, on: NaiveDate) -> Expense {
        Expense::from_draft(
            ExpenseId::new(),
            NewExpense::new(Money::from_major(amount), category, on),
        )
    }

    #[test]
    fn test_day_groups_partition_expenses() {
        let expenses = vec![
            expense(100.0, Category::Food, date(3, 2)),
            expense(40.0, Category::Coffee, date(3, 5)),
            expense(60.0, Category::Food, date(3, 2)),
            expense(25.0, Category::Food, date(3, 5)),
            expense(900.0, Category::Rent, date(2, 28)),
        ];
        let activity = ExpenseActivity::generate(&expenses, date(3, 10));

        let dates: Vec<_> = activity.days.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![date(3, 5), date(3, 2), date(2, 28)]);

        let grouped: Money = activity.days.iter().map(|g| g.total).sum();
        let total: Money = expenses.iter().map(|e| e.amount_etb).sum();
        assert_eq!(grouped, total);
        let count: usize = activity.days.iter().map(|g| g.expenses.len()).sum();
        assert_eq!(count, expenses.len());

        let fifth = activity.day(date(3, 5)).unwrap();
        assert_eq!(fifth.total, Money::from_major(65.0));
        assert_eq!(fifth.categories, vec![Category::Coffee, Category::Food]);

        assert_eq!(activity.spent_this_month, Money::from_major(225.0));
    }

    #[test]
    fn test_empty_activity() {
        let activity = ExpenseActivity::generate(&[], date(1, 1));
        assert!(activity.days.is_empty());
        assert_eq!(activity.spent_this_month, Money::zero());
        assert!(activity.format_terminal().contains("No expenses recorded."));
    }
}
