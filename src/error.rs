//! Custom error types for NomadFinance
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Failures reported by the identity/session service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Sign-in rejected the derived credentials
    #[error("invalid login credentials")]
    InvalidCredentials,

    /// Sign-up found an existing account for the derived identifier
    #[error("account already registered")]
    AlreadyRegistered,

    /// Sign-up succeeded but the service wants the address confirmed first
    #[error("account created but no session was issued (confirmation required)")]
    ConfirmationRequired,

    /// The stored token is no longer accepted
    #[error("session expired or revoked")]
    SessionRejected,

    /// Network failure, timeout or unexpected service response
    #[error("auth service unavailable: {0}")]
    Unavailable(String),
}

/// The main error type for NomadFinance operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Data service rejected or failed a request
    #[error("Remote error: {0}")]
    Remote(String),

    /// Identity/session service errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The host identity did not pass the access gate
    #[error("Access restricted. Allowed: @{allowed}, Found: @{found}")]
    AccessDenied { allowed: String, found: String },

    /// An operation was attempted without an authorized session
    #[error("Not authorized: {0}")]
    NotAuthorized(String),
}

impl FinanceError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for incomes
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for assets
    pub fn asset_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Asset",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the remote data service
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for FinanceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(err.to_string())
    }
}

/// Result type alias for NomadFinance operations
pub type FinanceResult<T> = Result<T, FinanceError>;
