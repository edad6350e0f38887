//! Expense service
//!
//! Adds and deletes expenses optimistically: the in-memory list changes
//! first, then the change is written to the data service (or the local
//! snapshot). A failed write puts the list back exactly as it was.

use tracing::{debug, warn};

use crate::auth::Haptic;
use crate::error::{FinanceError, FinanceResult};
use crate::models::expense::sort_newest_first;
use crate::models::{Expense, ExpenseId, NewExpense};
use crate::state::{AppState, Mutation};

/// Service for expense management
pub struct ExpenseService<'a> {
    state: &'a mut AppState,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    /// Expenses, newest first
    pub fn list(&self) -> &[Expense] {
        self.state.expenses()
    }

    /// Find an expense by full id or short display id
    pub fn find(&self, reference: &str) -> Option<&Expense> {
        self.state
            .expenses()
            .iter()
            .find(|e| e.id.matches_ref(reference))
    }

    /// Record a new expense
    ///
    /// With recurring expenses switched off in settings the draft is stored
    /// as a one-off. Returns the stored expense, which carries the id the
    /// data service assigned when signed in.
    pub async fn add(&mut self, draft: NewExpense) -> FinanceResult<Expense> {
        self.state.ensure_authorized()?;

        let draft = if self.state.settings().recurring_enabled {
            draft
        } else {
            draft.without_recurrence()
        };
        draft
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let local = Expense::from_draft(ExpenseId::new(), draft);
        let mut mutation = Mutation::begin(&self.state.ledger().expenses);
        {
            let expenses = &mut self.state.ledger_mut().expenses;
            expenses.insert(0, local.clone());
            sort_newest_first(expenses);
        }
        self.state.haptic(Haptic::SUCCESS);

        let result = match self.state.data() {
            Some(data) => data.insert_expense(&local).await,
            None => self.state.persist_expenses().map(|_| local.clone()),
        };

        match result {
            Ok(stored) => {
                let expenses = &mut self.state.ledger_mut().expenses;
                if let Some(slot) = expenses.iter_mut().find(|e| e.id == local.id) {
                    *slot = stored.clone();
                }
                sort_newest_first(expenses);
                mutation.confirm();
                debug!(id = %stored.id, "expense added");
                Ok(stored)
            }
            Err(e) => {
                mutation.roll_back(&mut self.state.ledger_mut().expenses);
                self.state.haptic(Haptic::ERROR);
                warn!(error = %e, "adding expense failed, rolled back");
                Err(e)
            }
        }
    }

    /// Delete one expense
    pub async fn delete(&mut self, id: ExpenseId) -> FinanceResult<Expense> {
        self.state.ensure_authorized()?;

        let index = self
            .state
            .expenses()
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))?;

        let mut mutation = Mutation::begin(&self.state.ledger().expenses);
        let removed = self.state.ledger_mut().expenses.remove(index);
        self.state.haptic(Haptic::MEDIUM);

        let result = match self.state.data() {
            Some(data) => data.delete_expense(id).await,
            None => self.state.persist_expenses(),
        };

        match result {
            Ok(()) => {
                mutation.confirm();
                debug!(id = %id, "expense deleted");
                Ok(removed)
            }
            Err(e) => {
                mutation.roll_back(&mut self.state.ledger_mut().expenses);
                self.state.haptic(Haptic::ERROR);
                warn!(error = %e, "deleting expense failed, rolled back");
                Err(e)
            }
        }
    }
}
