//! The hosted backend: identity/session service and data service
//!
//! Both sit behind traits so the state container and the bootstrap can run
//! against the HTTP implementation or an in-memory one.

pub mod auth;
pub mod data;
pub mod http;
#[cfg(test)]
pub(crate) mod memory;
pub mod rows;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::RemoteConfig;
use crate::error::{AuthError, FinanceResult};
use crate::models::{
    Asset, AssetId, AuthUser, Expense, ExpenseId, Income, IncomeId, Session, Settings,
};

pub use auth::GoTrueAuth;
pub use data::PostgrestData;
pub use http::RestClient;

/// Sign-in, sign-up and session checks
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Validate an access token and return its user
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

/// Per-user table access
///
/// Inserts return the stored row, which carries the id the service assigned.
#[async_trait]
pub trait DataService: Send + Sync {
    async fn fetch_expenses(&self) -> FinanceResult<Vec<Expense>>;
    async fn insert_expense(&self, expense: &Expense) -> FinanceResult<Expense>;
    async fn delete_expense(&self, id: ExpenseId) -> FinanceResult<()>;

    async fn fetch_incomes(&self) -> FinanceResult<Vec<Income>>;
    async fn insert_income(&self, income: &Income) -> FinanceResult<Income>;
    async fn delete_income(&self, id: IncomeId) -> FinanceResult<()>;

    async fn fetch_assets(&self) -> FinanceResult<Vec<Asset>>;
    async fn insert_asset(&self, asset: &Asset) -> FinanceResult<Asset>;
    async fn delete_asset(&self, id: AssetId) -> FinanceResult<()>;

    async fn fetch_settings(&self) -> FinanceResult<Option<Settings>>;
    async fn upsert_settings(&self, settings: &Settings) -> FinanceResult<()>;

    /// Delete every row the user owns, settings included
    async fn delete_all(&self) -> FinanceResult<()>;
}

/// Factory for the two services
pub trait RemoteBackend: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Data access scoped to the given session
    fn data(&self, session: &Session) -> Arc<dyn DataService>;
}

/// Supabase-style backend: GoTrue for auth, PostgREST for data
#[derive(Debug, Clone)]
pub struct SupabaseBackend {
    rest: RestClient,
}

impl SupabaseBackend {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// `None` when no remote is configured
    pub fn from_config(config: &RemoteConfig) -> FinanceResult<Option<Self>> {
        Ok(RestClient::from_config(config)?.map(Self::new))
    }
}

impl RemoteBackend for SupabaseBackend {
    fn auth(&self) -> Arc<dyn AuthService> {
        Arc::new(GoTrueAuth::new(self.rest.clone()))
    }

    fn data(&self, session: &Session) -> Arc<dyn DataService> {
        Arc::new(PostgrestData::new(self.rest.clone(), session))
    }
}
