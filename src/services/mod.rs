//! Service layer for NomadFinance
//!
//! The service layer applies validation and the optimistic-write contract
//! on top of the application state: change in memory first, then persist,
//! and restore the previous value if persisting fails.

pub mod asset;
pub mod expense;
pub mod income;
pub mod settings;

pub use asset::AssetService;
pub use expense::ExpenseService;
pub use income::IncomeService;
pub use settings::SettingsService;
