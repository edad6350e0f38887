//! Asset service
//!
//! Assets are prepended on creation. The sign convention (liabilities
//! negative, everything else positive) is applied by the draft itself.

use tracing::{debug, warn};

use crate::auth::Haptic;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Asset, AssetId, NewAsset};
use crate::state::{AppState, Mutation};

/// Service for asset management
pub struct AssetService<'a> {
    state: &'a mut AppState,
}

impl<'a> AssetService<'a> {
    /// Create a new asset service
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn list(&self) -> &[Asset] {
        self.state.assets()
    }

    pub fn find(&self, reference: &str) -> Option<&Asset> {
        self.state
            .assets()
            .iter()
            .find(|a| a.id.matches_ref(reference))
    }

    /// Record a new asset or liability
    pub async fn add(&mut self, draft: NewAsset) -> FinanceResult<Asset> {
        self.state.ensure_authorized()?;
        draft
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let local = Asset::from_draft(AssetId::new(), draft);
        let mut mutation = Mutation::begin(&self.state.ledger().assets);
        self.state.ledger_mut().assets.insert(0, local.clone());
        self.state.haptic(Haptic::SUCCESS);

        let result = match self.state.data() {
            Some(data) => data.insert_asset(&local).await,
            None => self.state.persist_assets().map(|_| local.clone()),
        };

        match result {
            Ok(stored) => {
                if let Some(slot) = self
                    .state
                    .ledger_mut()
                    .assets
                    .iter_mut()
                    .find(|a| a.id == local.id)
                {
                    *slot = stored.clone();
                }
                mutation.confirm();
                debug!(id = %stored.id, "asset added");
                Ok(stored)
            }
            Err(e) => {
                mutation.roll_back(&mut self.state.ledger_mut().assets);
                self.state.haptic(Haptic::ERROR);
                warn!(error = %e, "adding asset failed, rolled back");
                Err(e)
            }
        }
    }

    /// Delete one asset
    pub async fn delete(&mut self, id: AssetId) -> FinanceResult<Asset> {
        self.state.ensure_authorized()?;

        let index = self
            .state
            .assets()
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| FinanceError::asset_not_found(id.to_string()))?;

        let mut mutation = Mutation::begin(&self.state.ledger().assets);
        let removed = self.state.ledger_mut().assets.remove(index);
        self.state.haptic(Haptic::MEDIUM);

        let result = match self.state.data() {
            Some(data) => data.delete_asset(id).await,
            None => self.state.persist_assets(),
        };

        match result {
            Ok(()) => {
                mutation.confirm();
                Ok(removed)
            }
            Err(e) => {
                mutation.roll_back(&mut self.state.ledger_mut().assets);
                self.state.haptic(Haptic::ERROR);
                warn!(error = %e, "deleting asset failed, rolled back");
                Err(e)
            }
        }
    }
}
