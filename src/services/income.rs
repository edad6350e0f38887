//! Income service
//!
//! New incomes are prepended to the list; writes follow the same
//! optimistic contract as expenses.

use tracing::{debug, warn};

use crate::auth::Haptic;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Income, IncomeId, NewIncome};
use crate::state::{AppState, Mutation};

/// Service for income management
pub struct IncomeService<'a> {
    state: &'a mut AppState,
}

impl<'a> IncomeService<'a> {
    /// Create a new income service
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn list(&self) -> &[Income] {
        self.state.incomes()
    }

    pub fn find(&self, reference: &str) -> Option<&Income> {
        self.state
            .incomes()
            .iter()
            .find(|i| i.id.matches_ref(reference))
    }

    /// Record a new income
    pub async fn add(&mut self, draft: NewIncome) -> FinanceResult<Income> {
        self.state.ensure_authorized()?;
        draft
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let local = Income::from_draft(IncomeId::new(), draft);
        let mut mutation = Mutation::begin(&self.state.ledger().incomes);
        self.state.ledger_mut().incomes.insert(0, local.clone());
        self.state.haptic(Haptic::SUCCESS);

        let result = match self.state.data() {
            Some(data) => data.insert_income(&local).await,
            None => self.state.persist_incomes().map(|_| local.clone()),
        };

        match result {
            Ok(stored) => {
                if let Some(slot) = self
                    .state
                    .ledger_mut()
                    .incomes
                    .iter_mut()
                    .find(|i| i.id == local.id)
                {
                    *slot = stored.clone();
                }
                mutation.confirm();
                debug!(id = %stored.id, "income added");
                Ok(stored)
            }
            Err(e) => {
                mutation.roll_back(&mut self.state.ledger_mut().incomes);
                self.state.haptic(Haptic::ERROR);
                warn!(error = %e, "adding income failed, rolled back");
                Err(e)
            }
        }
    }

    /// Delete one income
    pub async fn delete(&mut self, id: IncomeId) -> FinanceResult<Income> {
        self.state.ensure_authorized()?;

        let index = self
            .state
            .incomes()
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| FinanceError::income_not_found(id.to_string()))?;

        let mut mutation = Mutation::begin(&self.state.ledger().incomes);
        let removed = self.state.ledger_mut().incomes.remove(index);
        self.state.haptic(Haptic::MEDIUM);

        let result = match self.state.data() {
            Some(data) => data.delete_income(id).await,
            None => self.state.persist_incomes(),
        };

        match result {
            Ok(()) => {
                mutation.confirm();
                Ok(removed)
            }
            Err(e) => {
                mutation.roll_back(&mut self.state.ledger_mut().incomes);
                self.state.haptic(Haptic::ERROR);
                warn!(error = %e, "deleting income failed, rolled back");
                Err(e)
            }
        }
    }
}
