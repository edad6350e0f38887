//! Settings CLI commands

use clap::Subcommand;

use super::{parse_amount_or_zero, parse_number_or_zero};
use crate::display::format_settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::SettingsPatch;
use crate::services::SettingsService;
use crate::state::AppState;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings
    Show,

    /// Change one or more settings
    Set {
        /// Exchange rate, ETB per 1 USD
        #[arg(long)]
        rate: Option<String>,

        /// Savings goal in USD
        #[arg(long)]
        goal: Option<String>,

        /// Allow recurring expenses: on or off
        #[arg(long)]
        recurring: Option<String>,

        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
}

/// Handle a settings command
pub async fn handle_settings_command(
    state: &mut AppState,
    cmd: SettingsCommands,
) -> FinanceResult<()> {
    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(state.settings()));
        }

        SettingsCommands::Set {
            rate,
            goal,
            recurring,
            name,
        } => {
            let recurring_enabled = match recurring.as_deref() {
                None => None,
                Some(value) => Some(parse_toggle(value).ok_or_else(|| {
                    FinanceError::Validation(format!("Expected on or off, got '{}'", value))
                })?),
            };
            let patch = SettingsPatch {
                exchange_rate: rate.as_deref().map(parse_number_or_zero),
                savings_goal_usd: goal.as_deref().map(parse_amount_or_zero),
                recurring_enabled,
                user_name: name,
            };
            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let updated = SettingsService::new(state).update(patch).await?;
            println!("Settings updated.");
            print!("{}", format_settings(&updated));
        }
    }

    Ok(())
}

fn parse_toggle(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
