//! Spending Report
//!
//! Lifetime spending analysis: totals per category, a per-day trend over
//! the last week or month, and the average spend per active day.

use chrono::{Duration, NaiveDate};
use std::collections::{BTreeSet, HashMap};

use crate::display::report::{format_bar, format_percentage, separator};
use crate::models::{Category, Currency, Expense, Money};

/// Length of the trend window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendWindow {
    #[default]
    Week,
    Month,
}

impl TrendWindow {
    /// Number of days covered, today included
    pub fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "7" => Some(Self::Week),
            "month" | "30" => Some(Self::Month),
            _ => None,
        }
    }
}

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    /// Total spent, in ETB
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Share of lifetime spending
    pub percentage: f64,
}

/// Spending on one day of the trend window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: Money,
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// Categories with spending, largest first
    pub categories: Vec<CategoryTotal>,
    /// One point per day, oldest first, ending today
    pub trend: Vec<TrendPoint>,
    pub window: TrendWindow,
    /// Sum of every expense, in ETB
    pub total_spent: Money,
    /// Number of distinct days with at least one expense
    pub active_days: usize,
    /// Total divided by active days; zero without expenses
    pub daily_average: Money,
}

impl SpendingReport {
    /// Generate the report from every expense
    pub fn generate(expenses: &[Expense], window: TrendWindow, today: NaiveDate) -> Self {
        let total_spent: Money = expenses.iter().map(|e| e.amount_etb).sum();
        let active_days = expenses
            .iter()
            .map(|e| e.date)
            .collect::<BTreeSet<_>>()
            .len();
        let daily_average = if active_days == 0 {
            Money::zero()
        } else {
            Money::from_major(total_spent.to_major() / active_days as f64)
        };

        Self {
            categories: category_totals(expenses, total_spent),
            trend: trend(expenses, window, today),
            window,
            total_spent,
            active_days,
            daily_average,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Spending Report\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Spent:   {}\n",
            self.total_spent.format_in(Currency::Etb)
        ));
        output.push_str(&format!(
            "Daily Average: {} over {} day(s)\n\n",
            self.daily_average.format_in(Currency::Etb),
            self.active_days
        ));

        output.push_str(&format!(
            "{:<16} {:>16} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&separator(60));
        output.push('\n');
        if self.categories.is_empty() {
            output.push_str("  (no spending yet)\n");
        }
        for row in &self.categories {
            output.push_str(&format!(
                "{:<16} {:>16} {:>8} {:>8}\n",
                row.category.label(),
                row.total.format_in(Currency::Etb),
                row.count,
                format_percentage(row.percentage)
            ));
        }

        output.push_str(&format!("\nLast {} days\n", self.window.days()));
        let peak = self
            .trend
            .iter()
            .map(|p| p.total.to_major())
            .fold(0.0, f64::max);
        for point in &self.trend {
            output.push_str(&format!(
                "  {} {:>14} {}\n",
                point.date.format("%a %d"),
                point.total.to_string(),
                format_bar(point.total.to_major(), peak, 24)
            ));
        }

        output
    }
}

/// Per-category totals, zero categories dropped, largest first
///
/// Ties keep the picker order of [`Category::ALL`].
pub fn category_totals(expenses: &[Expense], total_spent: Money) -> Vec<CategoryTotal> {
    let mut by_category: HashMap<Category, (Money, usize)> = HashMap::new();
    for expense in expenses {
        let entry = by_category
            .entry(expense.category)
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount_etb;
        entry.1 += 1;
    }

    let mut rows: Vec<CategoryTotal> = Category::ALL
        .iter()
        .filter_map(|category| {
            let (total, count) = by_category.get(category).copied()?;
            if total.is_zero() {
                return None;
            }
            let percentage = if total_spent.is_zero() {
                0.0
            } else {
                total.to_major() / total_spent.to_major() * 100.0
            };
            Some(CategoryTotal {
                category: *category,
                total,
                count,
                percentage,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// Daily totals for the window ending on `today`, oldest first
pub fn trend(expenses: &[Expense], window: TrendWindow, today: NaiveDate) -> Vec<TrendPoint> {
    let days = window.days();
    (0..days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let total = expenses
                .iter()
                .filter(|e| e.date == date)
                .map(|e| e.amount_etb)
                .sum();
            TrendPoint { date, total }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, NewExpense};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn expense(amount: f64, category: Category, d: u32) -> Expense {
        Expense::from_draft(
            ExpenseId::new(),
            NewExpense::new(Money::from_major(amount), category, date(d)),
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(300.0, Category::Food, 10),
            expense(120.0, Category::Coffee, 10),
            expense(500.0, Category::Food, 8),
            expense(5000.0, Category::Rent, 1),
            expense(80.0, Category::Coffee, 9),
        ]
    }

    #[test]
    fn test_category_totals_partition_the_total() {
        let expenses = sample();
        let report = SpendingReport::generate(&expenses, TrendWindow::Week, date(10));

        let sum: Money = report.categories.iter().map(|c| c.total).sum();
        assert_eq!(sum, report.total_spent);
        let count: usize = report.categories.iter().map(|c| c.count).sum();
        assert_eq!(count, expenses.len());

        let order: Vec<_> = report.categories.iter().map(|c| c.category).collect();
        assert_eq!(order, vec![Category::Rent, Category::Food, Category::Coffee]);
    }

    #[test]
    fn test_zero_categories_are_dropped() {
        let expenses = vec![
            expense(0.0, Category::Other, 3),
            expense(50.0, Category::Item, 3),
        ];
        let rows = category_totals(&expenses, Money::from_major(50.0));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, Category::Item);
        assert_eq!(rows[0].percentage, 100.0);
    }

    #[test]
    fn test_trend_window_partitions_recent_spending() {
        let expenses = sample();
        let week = trend(&expenses, TrendWindow::Week, date(10));

        assert_eq!(week.len(), 7);
        assert_eq!(week.first().unwrap().date, date(4));
        assert_eq!(week.last().unwrap().date, date(10));

        let in_window: Money = expenses
            .iter()
            .filter(|e| e.date >= date(4))
            .map(|e| e.amount_etb)
            .sum();
        let trend_sum: Money = week.iter().map(|p| p.total).sum();
        assert_eq!(trend_sum, in_window);
        assert_eq!(week[6].total, Money::from_major(420.0));

        assert_eq!(trend(&expenses, TrendWindow::Month, date(10)).len(), 30);
    }

    #[test]
    fn test_daily_average_uses_distinct_days() {
        let report = SpendingReport::generate(&sample(), TrendWindow::Week, date(10));
        assert_eq!(report.active_days, 4);
        assert_eq!(report.daily_average, Money::from_major(6000.0 / 4.0));
    }

    #[test]
    fn test_empty_list_has_zero_average() {
        let report = SpendingReport::generate(&[], TrendWindow::Month, date(10));
        assert_eq!(report.daily_average, Money::zero());
        assert_eq!(report.total_spent, Money::zero());
        assert!(report.categories.is_empty());
        assert!(report.format_terminal().contains("no spending yet"));
    }

    #[test]
    fn test_window_parse() {
        assert_eq!(TrendWindow::parse("Week"), Some(TrendWindow::Week));
        assert_eq!(TrendWindow::parse("30"), Some(TrendWindow::Month));
        assert_eq!(TrendWindow::parse("year"), None);
    }
}
