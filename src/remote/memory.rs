//! In-memory backend used by the unit tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{AuthError, FinanceError, FinanceResult};
use crate::models::{
    Asset, AssetId, AuthUser, Expense, ExpenseId, Income, IncomeId, Session, Settings,
};

use super::{AuthService, DataService, RemoteBackend};

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, (String, AuthUser)>,
    tokens: HashMap<String, AuthUser>,
    sign_up_error: Option<AuthError>,
    auth_delay: Option<Duration>,
    fail_writes: bool,
    fail_reads: bool,
    calls: Vec<String>,
    expenses: Vec<Expense>,
    incomes: Vec<Income>,
    assets: Vec<Asset>,
    settings: Option<Settings>,
}

/// Shared in-memory auth and data service; clones see the same state
#[derive(Clone, Default)]
pub(crate) struct MemoryRemote {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn with_account(self, email: &str, password: &str) -> Self {
        let user = AuthUser {
            id: format!("user-{}", Uuid::new_v4()),
            email: Some(email.to_string()),
        };
        self.lock()
            .accounts
            .insert(email.to_string(), (password.to_string(), user));
        self
    }

    /// Issue a valid session for a fresh user, as if signed in earlier
    pub fn issue_session(&self) -> Session {
        let user = AuthUser {
            id: format!("user-{}", Uuid::new_v4()),
            email: None,
        };
        self.new_session(user)
    }

    fn new_session(&self, user: AuthUser) -> Session {
        let token = format!("token-{}", Uuid::new_v4());
        self.lock().tokens.insert(token.clone(), user.clone());
        Session {
            access_token: token,
            refresh_token: None,
            expires_at: None,
            user,
        }
    }

    pub fn set_sign_up_error(&self, error: AuthError) {
        self.lock().sign_up_error = Some(error);
    }

    pub fn set_auth_delay(&self, delay: Duration) {
        self.lock().auth_delay = Some(delay);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.lock().expenses.clone()
    }

    pub fn incomes(&self) -> Vec<Income> {
        self.lock().incomes.clone()
    }

    pub fn assets(&self) -> Vec<Asset> {
        self.lock().assets.clone()
    }

    pub fn settings(&self) -> Option<Settings> {
        self.lock().settings.clone()
    }

    pub fn seed_expenses(&self, expenses: Vec<Expense>) {
        self.lock().expenses = expenses;
    }

    async fn record(&self, call: &str) {
        let delay = {
            let mut inner = self.lock();
            inner.calls.push(call.to_string());
            inner.auth_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn read(&self, call: &str) -> FinanceResult<MutexGuard<'_, Inner>> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(FinanceError::Remote(format!(
                "{} request failed with HTTP 503",
                call
            )));
        }
        Ok(inner)
    }

    fn write(&self, call: &str) -> FinanceResult<MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        inner.calls.push(call.to_string());
        if inner.fail_writes {
            return Err(FinanceError::Remote(format!("{} rejected", call)));
        }
        Ok(inner)
    }
}

#[async_trait]
impl AuthService for MemoryRemote {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.record("sign_in").await;
        let user = match self.lock().accounts.get(email) {
            Some((stored, user)) if stored == password => user.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        Ok(self.new_session(user))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.record("sign_up").await;
        if let Some(err) = self.lock().sign_up_error.clone() {
            return Err(err);
        }
        if self.lock().accounts.contains_key(email) {
            return Err(AuthError::AlreadyRegistered);
        }
        let user = AuthUser {
            id: format!("user-{}", Uuid::new_v4()),
            email: Some(email.to_string()),
        };
        self.lock()
            .accounts
            .insert(email.to_string(), (password.to_string(), user.clone()));
        Ok(self.new_session(user))
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        self.record("get_user").await;
        self.lock()
            .tokens
            .get(access_token)
            .cloned()
            .ok_or(AuthError::SessionRejected)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.record("sign_out").await;
        self.lock().tokens.remove(access_token);
        Ok(())
    }
}

#[async_trait]
impl DataService for MemoryRemote {
    async fn fetch_expenses(&self) -> FinanceResult<Vec<Expense>> {
        let mut expenses = self.read("expenses")?.expenses.clone();
        crate::models::expense::sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    async fn insert_expense(&self, expense: &Expense) -> FinanceResult<Expense> {
        let mut inner = self.write("insert_expense")?;
        let stored = Expense {
            id: ExpenseId::new(),
            ..expense.clone()
        };
        inner.expenses.push(stored.clone());
        Ok(stored)
    }

    async fn delete_expense(&self, id: ExpenseId) -> FinanceResult<()> {
        let mut inner = self.write("delete_expense")?;
        inner.expenses.retain(|e| e.id != id);
        Ok(())
    }

    async fn fetch_incomes(&self) -> FinanceResult<Vec<Income>> {
        let mut incomes = self.read("incomes")?.incomes.clone();
        incomes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(incomes)
    }

    async fn insert_income(&self, income: &Income) -> FinanceResult<Income> {
        let mut inner = self.write("insert_income")?;
        let stored = Income {
            id: IncomeId::new(),
            ..income.clone()
        };
        inner.incomes.push(stored.clone());
        Ok(stored)
    }

    async fn delete_income(&self, id: IncomeId) -> FinanceResult<()> {
        let mut inner = self.write("delete_income")?;
        inner.incomes.retain(|i| i.id != id);
        Ok(())
    }

    async fn fetch_assets(&self) -> FinanceResult<Vec<Asset>> {
        Ok(self.read("assets")?.assets.clone())
    }

    async fn insert_asset(&self, asset: &Asset) -> FinanceResult<Asset> {
        let mut inner = self.write("insert_asset")?;
        let stored = Asset {
            id: AssetId::new(),
            ..asset.clone()
        };
        inner.assets.push(stored.clone());
        Ok(stored)
    }

    async fn delete_asset(&self, id: AssetId) -> FinanceResult<()> {
        let mut inner = self.write("delete_asset")?;
        inner.assets.retain(|a| a.id != id);
        Ok(())
    }

    async fn fetch_settings(&self) -> FinanceResult<Option<Settings>> {
        Ok(self.read("settings")?.settings.clone())
    }

    async fn upsert_settings(&self, settings: &Settings) -> FinanceResult<()> {
        let mut inner = self.write("upsert_settings")?;
        inner.settings = Some(settings.clone());
        Ok(())
    }

    async fn delete_all(&self) -> FinanceResult<()> {
        let mut inner = self.write("delete_all")?;
        inner.expenses.clear();
        inner.incomes.clear();
        inner.assets.clear();
        inner.settings = None;
        Ok(())
    }
}

impl RemoteBackend for MemoryRemote {
    fn auth(&self) -> Arc<dyn AuthService> {
        Arc::new(self.clone())
    }

    fn data(&self, _session: &Session) -> Arc<dyn DataService> {
        Arc::new(self.clone())
    }
}
