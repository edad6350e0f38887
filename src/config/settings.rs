//! Application configuration for NomadFinance
//!
//! Holds everything that used to be hardcoded in the client: the remote
//! endpoint and key, the single allowed host identity, the derived-account
//! scheme and the bootstrap timeout. Values come from `config.json` and are
//! overlaid with `NOMAD_*` environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::NomadPaths;
use crate::error::FinanceError;

/// Bootstrap timeout bounds, in seconds
pub const MIN_BOOTSTRAP_TIMEOUT_SECS: u64 = 3;
pub const MAX_BOOTSTRAP_TIMEOUT_SECS: u64 = 8;

/// Remote backend endpoint settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Publishable (anon) API key
    #[serde(default)]
    pub api_key: String,
}

impl RemoteConfig {
    /// A remote is usable only when both the URL and the key are set
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

/// Derived-account scheme used by the session bootstrap
///
/// The account identifier is `"{username}@{domain}"`. The secret is shared
/// and reproducible by anyone who knows it, so it is never shipped as a
/// default; leaving it unset disables automatic sign-in and sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    #[serde(default = "default_account_domain")]
    pub domain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            domain: default_account_domain(),
            secret: None,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub remote: RemoteConfig,

    /// The single host username allowed through the access gate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_identity: Option<String>,

    #[serde(default)]
    pub account: AccountConfig,

    /// Upper bound on the session bootstrap, clamped to 3..=8 seconds
    #[serde(default = "default_bootstrap_timeout")]
    pub bootstrap_timeout_secs: u64,

    /// Persist list snapshots locally when no remote session exists
    #[serde(default = "default_true")]
    pub local_fallback: bool,

    /// Seed demo entries when running outside the host shell with no local data
    #[serde(default = "default_true")]
    pub demo_data: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_account_domain() -> String {
    "telegram.nomad.app".to_string()
}

fn default_bootstrap_timeout() -> u64 {
    MIN_BOOTSTRAP_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            remote: RemoteConfig::default(),
            allowed_identity: None,
            account: AccountConfig::default(),
            bootstrap_timeout_secs: default_bootstrap_timeout(),
            local_fallback: true,
            demo_data: true,
        }
    }
}

impl AppConfig {
    /// Load config from disk (or defaults) and apply environment overrides
    pub fn load(paths: &NomadPaths) -> Result<Self, FinanceError> {
        let mut config = Self::load_or_create(paths)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from disk, or create the default config if the file doesn't exist
    pub fn load_or_create(paths: &NomadPaths) -> Result<Self, FinanceError> {
        let config_path = paths.config_file();

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read config file: {}", e)))?;

            let config: AppConfig = serde_json::from_str(&contents)
                .map_err(|e| FinanceError::Config(format!("Failed to parse config file: {}", e)))?;

            Ok(config)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(AppConfig::default())
        }
    }

    /// Save config to disk
    pub fn save(&self, paths: &NomadPaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(paths.config_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Overlay values from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("NOMAD_REMOTE_URL") {
            self.remote.url = url;
        }
        if let Some(key) = lookup("NOMAD_REMOTE_KEY") {
            self.remote.api_key = key;
        }
        if let Some(user) = lookup("NOMAD_ALLOWED_USER") {
            self.allowed_identity = Some(user).filter(|u| !u.trim().is_empty());
        }
        if let Some(secret) = lookup("NOMAD_ACCOUNT_SECRET") {
            self.account.secret = Some(secret).filter(|s| !s.is_empty());
        }
        if let Some(domain) = lookup("NOMAD_ACCOUNT_DOMAIN") {
            self.account.domain = domain;
        }
        if let Some(secs) = lookup("NOMAD_BOOTSTRAP_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.bootstrap_timeout_secs = secs;
        }
        if let Some(flag) = lookup("NOMAD_LOCAL_FALLBACK") {
            self.local_fallback = parse_flag(&flag).unwrap_or(self.local_fallback);
        }
    }

    /// Bootstrap timeout clamped to the supported range
    pub fn bootstrap_timeout(&self) -> Duration {
        Duration::from_secs(
            self.bootstrap_timeout_secs
                .clamp(MIN_BOOTSTRAP_TIMEOUT_SECS, MAX_BOOTSTRAP_TIMEOUT_SECS),
        )
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.remote.is_configured());
        assert!(config.allowed_identity.is_none());
        assert!(config.account.secret.is_none());
        assert!(config.local_fallback);
        assert_eq!(config.bootstrap_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NomadPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut config = AppConfig::default();
        config.allowed_identity = Some("sam".into());
        config.remote.url = "https://example.supabase.co".into();
        config.remote.api_key = "anon".into();

        config.save(&paths).unwrap();

        let loaded = AppConfig::load_or_create(&paths).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.remote.is_configured());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NomadPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.config_file(), r#"{"allowed_identity": "sam"}"#).unwrap();

        let loaded = AppConfig::load_or_create(&paths).unwrap();
        assert_eq!(loaded.allowed_identity.as_deref(), Some("sam"));
        assert_eq!(loaded.account.domain, "telegram.nomad.app");
        assert!(loaded.demo_data);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("NOMAD_REMOTE_URL", "https://x.supabase.co"),
            ("NOMAD_REMOTE_KEY", "key"),
            ("NOMAD_ALLOWED_USER", "Sam"),
            ("NOMAD_ACCOUNT_SECRET", "s3cret"),
            ("NOMAD_BOOTSTRAP_TIMEOUT_SECS", "5"),
            ("NOMAD_LOCAL_FALLBACK", "off"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert!(config.remote.is_configured());
        assert_eq!(config.allowed_identity.as_deref(), Some("Sam"));
        assert_eq!(config.account.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.bootstrap_timeout(), Duration::from_secs(5));
        assert!(!config.local_fallback);
    }

    #[test]
    fn test_bootstrap_timeout_is_clamped() {
        let mut config = AppConfig::default();
        config.bootstrap_timeout_secs = 60;
        assert_eq!(config.bootstrap_timeout(), Duration::from_secs(8));
        config.bootstrap_timeout_secs = 0;
        assert_eq!(config.bootstrap_timeout(), Duration::from_secs(3));
    }
}
