//! Monthly Overview
//!
//! The dashboard numbers for one calendar month: what was spent, what came
//! in, what is left over and how far that gets toward the savings goal.

use chrono::NaiveDate;

use super::in_month;
use crate::display::report::{double_separator, format_bar, separator};
use crate::models::{Currency, Expense, Income, Money, Settings};

/// Number of latest expenses shown on the overview
pub const RECENT_EXPENSES: usize = 4;

/// Lower bound of the income forecast, as a fraction of total income
pub const FORECAST_LOW: f64 = 0.95;

/// Upper bound of the income forecast, as a fraction of total income
pub const FORECAST_HIGH: f64 = 1.10;

/// Projected income range for the month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastBand {
    pub low: Money,
    pub high: Money,
}

/// Monthly Overview
#[derive(Debug, Clone)]
pub struct MonthlyOverview {
    /// Any day in the reported month
    pub month: NaiveDate,
    /// Expenses dated in the month, in ETB
    pub expenses_etb: Money,
    /// The same total converted to USD
    pub expenses_usd: Money,
    /// Every stable income, regardless of date
    pub stable_income_usd: Money,
    /// Variable incomes dated in the month
    pub variable_income_usd: Money,
    /// Stable plus variable income
    pub total_income_usd: Money,
    /// Income minus converted expenses
    pub net_savings_usd: Money,
    /// Savings goal from settings
    pub savings_goal_usd: Money,
    /// Percentage of the goal reached, capped at 100
    pub savings_progress: f64,
    pub forecast: ForecastBand,
    /// Latest expenses, newest first
    pub recent: Vec<Expense>,
}

impl MonthlyOverview {
    /// Generate the overview for the month containing `month`
    pub fn generate(
        expenses: &[Expense],
        incomes: &[Income],
        settings: &Settings,
        month: NaiveDate,
    ) -> Self {
        let rate = settings.rate();

        let expenses_etb: Money = in_month(expenses, month, |e| e.date)
            .into_iter()
            .map(|e| e.amount_etb)
            .sum();
        let expenses_usd = rate.etb_to_usd(expenses_etb);

        let stable_income_usd: Money = incomes
            .iter()
            .filter(|i| i.is_stable())
            .map(|i| i.amount_usd)
            .sum();
        let variable_income_usd: Money = in_month(incomes, month, |i| i.date)
            .into_iter()
            .filter(|i| !i.is_stable())
            .map(|i| i.amount_usd)
            .sum();
        let total_income_usd = stable_income_usd + variable_income_usd;
        let net_savings_usd = total_income_usd - expenses_usd;

        let mut recent = expenses.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(RECENT_EXPENSES);

        Self {
            month,
            expenses_etb,
            expenses_usd,
            stable_income_usd,
            variable_income_usd,
            total_income_usd,
            net_savings_usd,
            savings_goal_usd: settings.savings_goal_usd,
            savings_progress: savings_progress(net_savings_usd, settings.savings_goal_usd),
            forecast: ForecastBand {
                low: total_income_usd.scale(FORECAST_LOW),
                high: total_income_usd.scale(FORECAST_HIGH),
            },
            recent,
        }
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Overview: {}\n", self.month.format("%B %Y")));
        output.push_str(&double_separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Income",
            self.total_income_usd.format_in(Currency::Usd)
        ));
        output.push_str(&format!(
            "  {:<22} {:>16}\n",
            "Stable",
            self.stable_income_usd.format_in(Currency::Usd)
        ));
        output.push_str(&format!(
            "  {:<22} {:>16}\n",
            "Variable",
            self.variable_income_usd.format_in(Currency::Usd)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}  ({})\n",
            "Spent",
            self.expenses_etb.format_in(Currency::Etb),
            self.expenses_usd.format_in(Currency::Usd)
        ));
        output.push_str(&format!(
            "{:<24} {:>16}\n",
            "Net savings",
            self.net_savings_usd.format_in(Currency::Usd)
        ));
        output.push_str(&separator(60));
        output.push('\n');

        output.push_str(&format!(
            "Goal {}  [{}] {:.0}%\n",
            self.savings_goal_usd.format_in(Currency::Usd),
            format_bar(self.savings_progress, 100.0, 20),
            self.savings_progress
        ));
        output.push_str(&format!(
            "Forecast {} - {}\n",
            self.forecast.low.format_in(Currency::Usd),
            self.forecast.high.format_in(Currency::Usd)
        ));

        if !self.recent.is_empty() {
            output.push_str("\nRecent\n");
            for expense in &self.recent {
                output.push_str(&format!(
                    "  {} {:<14} {:>14}\n",
                    expense.date.format("%Y-%m-%d"),
                    expense.category.label(),
                    expense.amount_etb.format_in(Currency::Etb)
                ));
            }
        }

        output
    }
}

/// Percentage of the goal covered by net savings
///
/// Capped at 100 from above; a zero goal reports 0.
pub fn savings_progress(net_savings: Money, goal: Money) -> f64 {
    if goal.is_zero() {
        return 0.0;
    }
    (net_savings.to_major() / goal.to_major() * 100.0).min(100.0)
}
