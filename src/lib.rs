//! NomadFinance - expense, income and asset tracking for a remote worker
//!
//! Expenses are recorded in Ethiopian birr, incomes and assets in US
//! dollars, converted through one user-set exchange rate. Data lives in a
//! hosted backend when a session can be established and falls back to
//! local JSON snapshots otherwise.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, incomes, assets, settings)
//! - `auth`: Host-shell access gate and session bootstrap
//! - `remote`: Identity and data service clients
//! - `storage`: Local JSON snapshot storage
//! - `state`: The application state and optimistic mutations
//! - `services`: Business logic layer
//! - `reports`: Derived aggregates
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use nomad_finance::config::{AppConfig, NomadPaths};
//!
//! let paths = NomadPaths::new()?;
//! let config = AppConfig::load(&paths)?;
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod remote;
pub mod reports;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
