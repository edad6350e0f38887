//! Demo ledger seeded outside the host shell

use chrono::{Duration, NaiveDate};

use crate::models::settings::DEMO_USER_NAME;
use crate::models::{
    Asset, AssetId, AssetType, Category, Expense, ExpenseId, Frequency, Income, IncomeId,
    IncomeKind, Ledger, Money, NewAsset, NewExpense, NewIncome, Settings,
};

/// Build the demo ledger with entries dated relative to `today`
pub fn demo_ledger(today: NaiveDate) -> Ledger {
    let expense = |amount: f64, category, days_ago: i64, note: &str| {
        NewExpense::new(
            Money::from_major(amount),
            category,
            today - Duration::days(days_ago),
        )
        .with_note(note)
    };

    let expenses = vec![
        expense(450.0, Category::Food, 0, "Lunch"),
        expense(150.0, Category::Transport, 0, "Ride"),
        expense(2500.0, Category::Internet, 2, "WiFi Bill").recurring(Frequency::Monthly),
        expense(800.0, Category::Entertainment, 5, "Cinema"),
    ]
    .into_iter()
    .map(|draft| Expense::from_draft(ExpenseId::new(), draft))
    .collect();

    let incomes = vec![
        NewIncome::new(
            Money::from_major(1500.0),
            "Upwork Client A",
            today,
            IncomeKind::Stable,
        ),
        NewIncome::new(
            Money::from_major(300.0),
            "Logo Project",
            today - Duration::days(3),
            IncomeKind::Variable,
        ),
    ]
    .into_iter()
    .map(|draft| Income::from_draft(IncomeId::new(), draft))
    .collect();

    let assets = vec![
        NewAsset::new("Emergency Cash", Money::from_major(500.0), AssetType::Cash),
        NewAsset::new("MacBook Pro", Money::from_major(1200.0), AssetType::Item),
        NewAsset::new("Dave", Money::from_major(200.0), AssetType::Lent),
    ]
    .into_iter()
    .map(|draft| Asset::from_draft(AssetId::new(), draft))
    .collect();

    Ledger {
        expenses,
        incomes,
        assets,
        settings: Settings::named(DEMO_USER_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ledger() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let ledger = demo_ledger(today);

        assert_eq!(ledger.expenses.len(), 4);
        assert_eq!(ledger.incomes.len(), 2);
        assert_eq!(ledger.assets.len(), 3);
        assert_eq!(ledger.settings.user_name, "Demo User");

        // Newest first
        assert!(ledger.expenses.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(ledger.expenses[3].date, today - Duration::days(5));

        let wifi = &ledger.expenses[2];
        assert!(wifi.is_recurring);
        assert_eq!(wifi.frequency, Some(Frequency::Monthly));
    }
}
