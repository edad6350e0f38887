//! Data service over the PostgREST HTTP API
//!
//! Every request is made on behalf of one signed-in user and filtered by
//! their `user_id`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Asset, AssetId, Expense, ExpenseId, Income, IncomeId, Session, Settings};

use super::http::{check_status, snippet, RestClient};
use super::rows::{AssetRow, ExpenseRow, IncomeRow, SettingsRow};
use super::DataService;

const EXPENSES: &str = "expenses";
const INCOMES: &str = "incomes";
const ASSETS: &str = "assets";
const USER_SETTINGS: &str = "user_settings";

/// PostgREST client scoped to a session
#[derive(Debug, Clone)]
pub struct PostgrestData {
    rest: RestClient,
    access_token: String,
    user_id: String,
}

impl PostgrestData {
    pub fn new(rest: RestClient, session: &Session) -> Self {
        Self {
            rest,
            access_token: session.access_token.clone(),
            user_id: session.user_id().to_string(),
        }
    }

    fn table(&self, method: Method, table: &str) -> RequestBuilder {
        self.rest
            .request(method, &format!("/rest/v1/{}", table), Some(&self.access_token))
    }

    fn owner_filter(&self) -> String {
        format!("eq.{}", self.user_id)
    }

    async fn send(table: &str, request: RequestBuilder) -> FinanceResult<reqwest::Response> {
        let response = request.send().await?;
        check_status(response).await.map_err(|(status, body)| {
            FinanceError::Remote(format!(
                "{} request failed with HTTP {}: {}",
                table,
                status.as_u16(),
                snippet(&body)
            ))
        })
    }

    async fn select<R>(&self, table: &str, order_by_date: bool) -> FinanceResult<Vec<R>>
    where
        R: DeserializeOwned + Send,
    {
        let owner = self.owner_filter();
        let mut query = vec![("select", "*"), ("user_id", owner.as_str())];
        if order_by_date {
            query.push(("order", "date.desc"));
        }

        let response = Self::send(table, self.table(Method::GET, table).query(&query)).await?;
        let rows: Vec<R> = response.json().await?;
        debug!(table, count = rows.len(), "fetched rows");
        Ok(rows)
    }

    async fn insert<W, R>(&self, table: &str, row: &W) -> FinanceResult<R>
    where
        W: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        let request = self
            .table(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(row);

        let response = Self::send(table, request).await?;
        let mut rows: Vec<R> = response.json().await?;
        if rows.is_empty() {
            return Err(FinanceError::Remote(format!("{} insert returned no rows", table)));
        }
        Ok(rows.remove(0))
    }

    async fn delete_where(&self, table: &str, column: &str, filter: String) -> FinanceResult<()> {
        let request = self
            .table(Method::DELETE, table)
            .query(&[(column, filter.as_str())]);
        Self::send(table, request).await?;
        Ok(())
    }
}

#[async_trait]
impl DataService for PostgrestData {
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn fetch_expenses(&self) -> FinanceResult<Vec<Expense>> {
        let rows: Vec<ExpenseRow> = self.select(EXPENSES, true).await?;
        Ok(rows.into_iter().map(ExpenseRow::into_model).collect())
    }

    #[instrument(skip(self, expense), fields(user_id = %self.user_id))]
    async fn insert_expense(&self, expense: &Expense) -> FinanceResult<Expense> {
        let row = ExpenseRow::for_insert(expense, &self.user_id);
        let stored: ExpenseRow = self.insert(EXPENSES, &row).await?;
        Ok(stored.into_model())
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn delete_expense(&self, id: ExpenseId) -> FinanceResult<()> {
        self.delete_where(EXPENSES, "id", format!("eq.{}", id.as_uuid()))
            .await
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn fetch_incomes(&self) -> FinanceResult<Vec<Income>> {
        let rows: Vec<IncomeRow> = self.select(INCOMES, true).await?;
        Ok(rows.into_iter().map(IncomeRow::into_model).collect())
    }

    #[instrument(skip(self, income), fields(user_id = %self.user_id))]
    async fn insert_income(&self, income: &Income) -> FinanceResult<Income> {
        let row = IncomeRow::for_insert(income, &self.user_id);
        let stored: IncomeRow = self.insert(INCOMES, &row).await?;
        Ok(stored.into_model())
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn delete_income(&self, id: IncomeId) -> FinanceResult<()> {
        self.delete_where(INCOMES, "id", format!("eq.{}", id.as_uuid()))
            .await
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn fetch_assets(&self) -> FinanceResult<Vec<Asset>> {
        let rows: Vec<AssetRow> = self.select(ASSETS, false).await?;
        Ok(rows.into_iter().map(AssetRow::into_model).collect())
    }

    #[instrument(skip(self, asset), fields(user_id = %self.user_id))]
    async fn insert_asset(&self, asset: &Asset) -> FinanceResult<Asset> {
        let row = AssetRow::for_insert(asset, &self.user_id);
        let stored: AssetRow = self.insert(ASSETS, &row).await?;
        Ok(stored.into_model())
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn delete_asset(&self, id: AssetId) -> FinanceResult<()> {
        self.delete_where(ASSETS, "id", format!("eq.{}", id.as_uuid()))
            .await
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn fetch_settings(&self) -> FinanceResult<Option<Settings>> {
        let rows: Vec<SettingsRow> = self.select(USER_SETTINGS, false).await?;
        Ok(rows.into_iter().next().map(SettingsRow::into_model))
    }

    #[instrument(skip(self, settings), fields(user_id = %self.user_id))]
    async fn upsert_settings(&self, settings: &Settings) -> FinanceResult<()> {
        let row = SettingsRow::from_model(settings, &self.user_id);
        let request = self
            .table(Method::POST, USER_SETTINGS)
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row);
        Self::send(USER_SETTINGS, request).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    async fn delete_all(&self) -> FinanceResult<()> {
        for table in [EXPENSES, INCOMES, ASSETS, USER_SETTINGS] {
            self.delete_where(table, "user_id", self.owner_filter()).await?;
        }
        Ok(())
    }
}
