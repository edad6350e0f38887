//! Income and asset display formatting

use super::report::truncate;
use crate::models::{Asset, Currency, Income};

/// Format a list of incomes
pub fn format_income_list(incomes: &[Income]) -> String {
    if incomes.is_empty() {
        return "No incomes found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<20} {:<8} {:>12}\n",
        "ID", "Date", "Source", "Type", "Amount"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for income in incomes {
        output.push_str(&format!(
            "{}  {}  {:<20} {:<8} {:>12}\n",
            income.id,
            income.date.format("%Y-%m-%d"),
            truncate(&income.source, 20),
            income.kind,
            income.amount_usd.format_in(Currency::Usd)
        ));
    }

    output
}

/// Format a list of assets; liabilities are flagged
pub fn format_asset_list(assets: &[Asset]) -> String {
    if assets.is_empty() {
        return "No assets found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<20} {:<6} {:>12}\n",
        "ID", "Name", "Type", "Amount"
    ));
    output.push_str(&"-".repeat(56));
    output.push('\n');

    for asset in assets {
        let marker = if asset.is_liability() { " (owed)" } else { "" };
        output.push_str(&format!(
            "{}  {:<20} {:<6} {:>12}{}\n",
            asset.id,
            truncate(&asset.name, 20),
            asset.asset_type,
            asset.amount_usd.format_in(Currency::Usd),
            marker
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetId, AssetType, Money, NewAsset};

    #[test]
    fn test_loan_is_flagged() {
        let loan = Asset::from_draft(
            AssetId::new(),
            NewAsset::new("Bank", Money::from_major(250.0), AssetType::Loan),
        );
        let text = format_asset_list(&[loan]);
        assert!(text.contains("-$250.00 (owed)"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_income_list(&[]), "No incomes found.\n");
        assert_eq!(format_asset_list(&[]), "No assets found.\n");
    }
}
