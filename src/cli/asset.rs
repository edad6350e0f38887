//! Asset CLI commands

use clap::Subcommand;

use super::parse_amount_or_zero;
use crate::display::format_asset_list;
use crate::error::{FinanceError, FinanceResult};
use crate::models::asset::sort_by_type;
use crate::models::{AssetType, Currency, NewAsset};
use crate::services::AssetService;
use crate::state::AppState;

/// Asset subcommands
#[derive(Subcommand)]
pub enum AssetCommands {
    /// Record an asset or liability in USD
    Add {
        /// Name of the asset, borrower or lender
        name: String,

        /// Amount in USD; loans are always stored as negative
        amount: String,

        /// Type: cash, item, lent or loan
        #[arg(short = 't', long = "type", default_value = "cash")]
        asset_type: String,
    },

    /// List assets by type
    List,

    /// Delete an asset
    Delete {
        /// Asset ID (full or short form)
        id: String,
    },
}

/// Handle an asset command
pub async fn handle_asset_command(state: &mut AppState, cmd: AssetCommands) -> FinanceResult<()> {
    match cmd {
        AssetCommands::Add {
            name,
            amount,
            asset_type,
        } => {
            let asset_type = AssetType::parse(&asset_type).ok_or_else(|| {
                FinanceError::Validation(format!("Unknown asset type '{}'", asset_type))
            })?;

            let asset = AssetService::new(state)
                .add(NewAsset::new(name, parse_amount_or_zero(&amount), asset_type))
                .await?;
            println!(
                "Added {} {}: {} ({})",
                asset.asset_type,
                asset.id,
                asset.name,
                asset.amount_usd.format_in(Currency::Usd)
            );
        }

        AssetCommands::List => {
            let mut assets = state.assets().to_vec();
            sort_by_type(&mut assets);
            print!("{}", format_asset_list(&assets));
        }

        AssetCommands::Delete { id } => {
            let mut service = AssetService::new(state);
            let target = service
                .find(&id)
                .map(|a| a.id)
                .ok_or_else(|| FinanceError::asset_not_found(&id))?;
            let removed = service.delete(target).await?;
            println!("Deleted asset {} ({})", removed.id, removed.name);
        }
    }

    Ok(())
}
