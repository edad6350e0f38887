//! Local snapshot store
//!
//! Each list is written as a complete JSON array to its own file every time
//! it changes. Settings live in a separate single-record file.

use tracing::{debug, warn};

use crate::config::paths::NomadPaths;
use crate::error::FinanceError;
use crate::models::{Asset, Expense, Income, Ledger, Settings};

use super::file_io::{read_json, read_json_optional, write_json_atomic};

/// Full-list snapshots for the local fallback mode
#[derive(Debug, Clone)]
pub struct LocalStore {
    paths: NomadPaths,
}

impl LocalStore {
    pub fn new(paths: NomadPaths) -> Self {
        Self { paths }
    }

    /// True when any snapshot file exists
    pub fn has_data(&self) -> bool {
        self.paths.has_local_data()
    }

    pub fn load_expenses(&self) -> Result<Vec<Expense>, FinanceError> {
        read_json(self.paths.expenses_file())
    }

    pub fn save_expenses(&self, expenses: &[Expense]) -> Result<(), FinanceError> {
        debug!(count = expenses.len(), "writing expense snapshot");
        write_json_atomic(self.paths.expenses_file(), expenses)
    }

    pub fn load_incomes(&self) -> Result<Vec<Income>, FinanceError> {
        read_json(self.paths.incomes_file())
    }

    pub fn save_incomes(&self, incomes: &[Income]) -> Result<(), FinanceError> {
        debug!(count = incomes.len(), "writing income snapshot");
        write_json_atomic(self.paths.incomes_file(), incomes)
    }

    /// Load the asset snapshot, re-applying the liability sign to every amount
    pub fn load_assets(&self) -> Result<Vec<Asset>, FinanceError> {
        let assets: Vec<Asset> = read_json(self.paths.assets_file())?;
        Ok(assets
            .into_iter()
            .map(|asset| Asset {
                amount_usd: asset.asset_type.signed(asset.amount_usd),
                ..asset
            })
            .collect())
    }

    pub fn save_assets(&self, assets: &[Asset]) -> Result<(), FinanceError> {
        debug!(count = assets.len(), "writing asset snapshot");
        write_json_atomic(self.paths.assets_file(), assets)
    }

    /// Load the settings snapshot, `None` if it was never written
    pub fn load_settings(&self) -> Result<Option<Settings>, FinanceError> {
        read_json_optional(self.paths.settings_file())
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), FinanceError> {
        write_json_atomic(self.paths.settings_file(), settings)
    }

    /// Load every snapshot into a ledger; missing settings fall back to `default_settings`
    ///
    /// An unreadable snapshot is logged and read as empty; the next save replaces it.
    pub fn load_ledger(&self, default_settings: Settings) -> Ledger {
        Ledger {
            expenses: or_empty("expenses", self.load_expenses()),
            incomes: or_empty("incomes", self.load_incomes()),
            assets: or_empty("assets", self.load_assets()),
            settings: or_empty("settings", self.load_settings()).unwrap_or(default_settings),
        }
    }

    pub fn save_ledger(&self, ledger: &Ledger) -> Result<(), FinanceError> {
        self.save_expenses(&ledger.expenses)?;
        self.save_incomes(&ledger.incomes)?;
        self.save_assets(&ledger.assets)?;
        self.save_settings(&ledger.settings)
    }
}

fn or_empty<T: Default>(name: &str, loaded: Result<T, FinanceError>) -> T {
    loaded.unwrap_or_else(|e| {
        warn!(snapshot = name, error = %e, "ignoring unreadable snapshot");
        T::default()
    })
}
