//! Income and Asset Summary
//!
//! Totals for stable and variable income and the net value of everything
//! owned, lent and owed.

use crate::models::asset::sort_by_type;
use crate::models::{Asset, AssetType, Currency, Income, Money};

/// Income and asset summary
#[derive(Debug, Clone)]
pub struct HoldingsSummary {
    /// Every stable income, in USD
    pub stable_total: Money,
    /// Every variable income, in USD
    pub variable_total: Money,
    /// Signed sum of all assets; loans count against it
    pub net_assets: Money,
    /// Incomes, newest first
    pub incomes: Vec<Income>,
    /// Assets ordered cash, item, lent, loan
    pub assets: Vec<Asset>,
}

impl HoldingsSummary {
    pub fn generate(incomes: &[Income], assets: &[Asset]) -> Self {
        let (stable, variable): (Vec<&Income>, Vec<&Income>) =
            incomes.iter().partition(|i| i.is_stable());

        let mut incomes = incomes.to_vec();
        incomes.sort_by(|a, b| b.date.cmp(&a.date));

        let mut sorted_assets = assets.to_vec();
        sort_by_type(&mut sorted_assets);

        Self {
            stable_total: stable.iter().map(|i| i.amount_usd).sum(),
            variable_total: variable.iter().map(|i| i.amount_usd).sum(),
            net_assets: assets.iter().map(|a| a.amount_usd).sum(),
            incomes,
            assets: sorted_assets,
        }
    }

    pub fn total_income(&self) -> Money {
        self.stable_total + self.variable_total
    }

    /// Sum of the assets of one type
    pub fn total_for(&self, asset_type: AssetType) -> Money {
        self.assets
            .iter()
            .filter(|a| a.asset_type == asset_type)
            .map(|a| a.amount_usd)
            .sum()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Income\n");
        output.push_str(&format!(
            "  Stable:   {:>14}\n",
            self.stable_total.format_in(Currency::Usd)
        ));
        output.push_str(&format!(
            "  Variable: {:>14}\n",
            self.variable_total.format_in(Currency::Usd)
        ));
        output.push_str("\nAssets\n");
        for asset_type in AssetType::ALL {
            let total = self.total_for(asset_type);
            if !total.is_zero() {
                output.push_str(&format!(
                    "  {:<9} {:>14}\n",
                    format!("{}:", asset_type),
                    total.format_in(Currency::Usd)
                ));
            }
        }
        output.push_str(&format!(
            "  Net:      {:>14}\n",
            self.net_assets.format_in(Currency::Usd)
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetId, IncomeId, IncomeKind, NewAsset, NewIncome};
    use chrono::NaiveDate;

    fn income(amount: f64, d: u32, kind: IncomeKind) -> Income {
        Income::from_draft(
            IncomeId::new(),
            NewIncome::new(
                Money::from_major(amount),
                "client",
                NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
                kind,
            ),
        )
    }

    fn asset(name: &str, amount: f64, asset_type: AssetType) -> Asset {
        Asset::from_draft(
            AssetId::new(),
            NewAsset::new(name, Money::from_major(amount), asset_type),
        )
    }

    #[test]
    fn test_income_totals() {
        let incomes = vec![
            income(1500.0, 1, IncomeKind::Stable),
            income(200.0, 20, IncomeKind::Variable),
            income(300.0, 5, IncomeKind::Variable),
        ];
        let summary = HoldingsSummary::generate(&incomes, &[]);

        assert_eq!(summary.stable_total, Money::from_major(1500.0));
        assert_eq!(summary.variable_total, Money::from_major(500.0));
        assert_eq!(summary.total_income(), Money::from_major(2000.0));

        let days: Vec<_> = summary.incomes.iter().map(|i| i.date).collect();
        assert!(days.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_net_assets_subtract_loans() {
        let assets = vec![
            asset("Bank loan", 400.0, AssetType::Loan),
            asset("Laptop", 900.0, AssetType::Item),
            asset("Wallet", 150.0, AssetType::Cash),
            asset("Dave", 50.0, AssetType::Lent),
        ];
        let summary = HoldingsSummary::generate(&[], &assets);

        assert_eq!(summary.net_assets, Money::from_major(700.0));
        assert_eq!(summary.total_for(AssetType::Loan), Money::from_major(-400.0));

        let order: Vec<_> = summary.assets.iter().map(|a| a.asset_type).collect();
        assert_eq!(
            order,
            vec![AssetType::Cash, AssetType::Item, AssetType::Lent, AssetType::Loan]
        );
    }

    #[test]
    fn test_format_terminal() {
        let summary = HoldingsSummary::generate(
            &[income(1500.0, 1, IncomeKind::Stable)],
            &[asset("Wallet", 150.0, AssetType::Cash)],
        );
        let text = summary.format_terminal();
        assert!(text.contains("$1500.00"));
        assert!(text.contains("Net:"));
    }
}
