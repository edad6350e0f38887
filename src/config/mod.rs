//! Configuration module for NomadFinance
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - Application config persistence with environment overrides

pub mod paths;
pub mod settings;

pub use paths::NomadPaths;
pub use settings::{AccountConfig, AppConfig, RemoteConfig};
