//! Path management for NomadFinance
//!
//! Resolves where configuration, local snapshots, the persisted session and
//! log files live.
//!
//! ## Path Resolution Order
//!
//! 1. `NOMAD_FINANCE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/nomad-finance` on Linux, `%APPDATA%\nomad-finance` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FinanceError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "NOMAD_FINANCE_DATA_DIR";

/// Manages all paths used by NomadFinance
#[derive(Debug, Clone)]
pub struct NomadPaths {
    /// Base directory for all NomadFinance data
    base_dir: PathBuf,
}

impl NomadPaths {
    /// Create a new NomadPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, FinanceError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create NomadPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the local snapshot directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the path to the application config file
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted session token
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn incomes_file(&self) -> PathBuf {
        self.data_dir().join("incomes.json")
    }

    pub fn assets_file(&self) -> PathBuf {
        self.data_dir().join("assets.json")
    }

    /// Get the path to the user settings snapshot
    pub fn settings_file(&self) -> PathBuf {
        self.data_dir().join("settings.json")
    }

    /// Ensure the base, data and log directories exist
    pub fn ensure_directories(&self) -> Result<(), FinanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinanceError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.log_dir())
            .map_err(|e| FinanceError::Io(format!("Failed to create log directory: {}", e)))?;

        Ok(())
    }

    /// True when any local snapshot has been written before
    pub fn has_local_data(&self) -> bool {
        [
            self.expenses_file(),
            self.incomes_file(),
            self.assets_file(),
            self.settings_file(),
        ]
        .iter()
        .any(|p| p.exists())
    }
}

fn resolve_default_path() -> Result<PathBuf, FinanceError> {
    ProjectDirs::from("", "", "nomad-finance")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FinanceError::Config("Could not determine config directory".into()))
}
