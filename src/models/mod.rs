//! Core data models for NomadFinance
//!
//! This module contains the data structures of the tracker: expenses,
//! incomes, assets, the per-user settings record, the ledger holding them
//! and the auth session.

pub mod asset;
pub mod currency;
pub mod expense;
pub mod ids;
pub mod income;
pub mod ledger;
pub mod money;
pub mod session;
pub mod settings;

pub use asset::{Asset, AssetType, NewAsset};
pub use currency::{Currency, ExchangeRate};
pub use expense::{Category, Expense, Frequency, NewExpense};
pub use ids::{AssetId, ExpenseId, IncomeId};
pub use income::{Income, IncomeKind, NewIncome};
pub use ledger::Ledger;
pub use money::Money;
pub use session::{AuthUser, Session};
pub use settings::{Settings, SettingsPatch};
