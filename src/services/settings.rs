//! Settings service
//!
//! Partial settings updates and the full data reset.

use tracing::{info, warn};

use crate::auth::Haptic;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Settings, SettingsPatch};
use crate::state::{AppState, Mutation};

/// Service for the per-user settings record
pub struct SettingsService<'a> {
    state: &'a mut AppState,
}

impl<'a> SettingsService<'a> {
    /// Create a new settings service
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn current(&self) -> &Settings {
        self.state.settings()
    }

    /// Apply a partial update and store the whole record
    pub async fn update(&mut self, patch: SettingsPatch) -> FinanceResult<Settings> {
        self.state.ensure_authorized()?;
        validate(&patch)?;

        let mut mutation = Mutation::begin(&self.state.ledger().settings);
        self.state.ledger_mut().settings.apply(&patch);

        let result = match self.state.data() {
            Some(data) => data.upsert_settings(self.state.settings()).await,
            None => self.state.persist_settings(),
        };

        match result {
            Ok(()) => {
                mutation.confirm();
                Ok(self.state.settings().clone())
            }
            Err(e) => {
                mutation.roll_back(&mut self.state.ledger_mut().settings);
                self.state.haptic(Haptic::ERROR);
                warn!(error = %e, "settings update failed, rolled back");
                Err(e)
            }
        }
    }

    /// Delete every entry and restore default settings
    ///
    /// Signed in, this removes all of the user's rows and stores fresh
    /// default settings.
    pub async fn reset(&mut self) -> FinanceResult<()> {
        self.state.ensure_authorized()?;
        self.state.haptic(Haptic::WARNING);

        let mut mutation = Mutation::begin(self.state.ledger());
        self.state.ledger_mut().clear();

        let result = match self.state.data() {
            Some(data) => match data.delete_all().await {
                Ok(()) => data.upsert_settings(self.state.settings()).await,
                Err(e) => Err(e),
            },
            None => self.state.persist_ledger(),
        };

        match result {
            Ok(()) => {
                mutation.confirm();
                info!("all data reset");
                Ok(())
            }
            Err(e) => {
                mutation.roll_back(self.state.ledger_mut());
                self.state.haptic(Haptic::ERROR);
                warn!(error = %e, "reset failed, rolled back");
                Err(e)
            }
        }
    }
}

fn validate(patch: &SettingsPatch) -> FinanceResult<()> {
    if let Some(rate) = patch.exchange_rate {
        if !rate.is_finite() || rate < 0.0 {
            return Err(FinanceError::Validation(
                "Exchange rate must be a non-negative number".into(),
            ));
        }
    }
    if let Some(goal) = patch.savings_goal_usd {
        if goal.is_negative() {
            return Err(FinanceError::Validation(
                "Savings goal cannot be negative".into(),
            ));
        }
    }
    if let Some(name) = &patch.user_name {
        if name.trim().is_empty() {
            return Err(FinanceError::Validation("Name cannot be empty".into()));
        }
    }
    Ok(())
}
