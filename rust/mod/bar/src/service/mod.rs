pub mod catalog;
pub mod creator;
pub mod dashboard;
pub mod import;
pub mod inventory;
pub mod menu;
pub mod party;
pub mod paywall;
pub mod prep;
pub mod sales;
pub mod timers;
pub mod training;

pub use catalog::{CatalogFilters, RecipeDetail};
pub use creator::CreatorPreview;
pub use dashboard::{DashboardStats, Period, SalesReport, ShiftView};
pub use import::ImportReport;
pub use inventory::{InventoryFilters, RailMove, ShoppingReport};
pub use party::PartyStats;
pub use paywall::{PaywallStatus, TOOLS, Tool};
pub use prep::{BatchView, ExpiryAlerts};
pub use training::{IngredientGroup, MixAttempt, MixScore, QuizCard, QuizScore};

use kv::KVStore;
use openbar_core::{merge_patch, ServiceError};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::{BarState, StateStore};

/// Bar service. Owns the in-memory state and the store that persists it.
///
/// Every mutating operation edits `state` and then calls [`BarService::persist`]
/// exactly once, so a crash can lose at most the latest operation and storage
/// never holds a half-written state.
pub struct BarService {
    pub(crate) state: BarState,
    store: StateStore,
}

impl BarService {
    /// Open the service over a key-value backend. Loads persisted state,
    /// falling back to bundled datasets and compiled-in defaults per
    /// collection, so this never fails on a corrupt or empty store.
    pub fn open(kv: Box<dyn KVStore>) -> Self {
        let store = StateStore::new(kv);
        let state = store.load();
        Self { state, store }
    }

    /// Read access to the full bar state.
    pub fn state(&self) -> &BarState {
        &self.state
    }

    /// Write the whole state back to storage in a single batch.
    pub(crate) fn persist(&self) -> Result<(), ServiceError> {
        self.store.save(&self.state)
    }

    /// Gate shared by the locked tools. `tool` names the feature in the error.
    pub(crate) fn require_premium(&self, tool: &str) -> Result<(), ServiceError> {
        if self.state.premium.premium {
            Ok(())
        } else {
            Err(ServiceError::PermissionDenied(format!(
                "{tool} is a premium feature"
            )))
        }
    }

    /// Merge a JSON patch into a record. Recipes and ingredients key on
    /// their name, so `name` is stripped from the patch before merging.
    pub(crate) fn apply_patch<T: Serialize + DeserializeOwned>(
        current: &T,
        patch: serde_json::Value,
    ) -> Result<T, ServiceError> {
        let mut json = serde_json::to_value(current)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let mut patch = patch;
        if let Some(obj) = patch.as_object_mut() {
            obj.remove("name");
        }

        merge_patch(&mut json, &patch);
        serde_json::from_value(json).map_err(|e| ServiceError::Internal(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use kv::RedbStore;
    use tempfile::TempDir;

    use super::BarService;

    /// Fresh service over a throwaway redb file, seeded with the default bar.
    pub fn service() -> (TempDir, BarService) {
        let dir = TempDir::new().unwrap();
        let kv = RedbStore::open(&dir.path().join("bar.redb")).unwrap();
        let svc = BarService::open(Box::new(kv));
        (dir, svc)
    }

    /// Same as [`service`] but with premium unlocked.
    pub fn premium_service() -> (TempDir, BarService) {
        let (dir, mut svc) = service();
        svc.state.premium.premium = true;
        (dir, svc)
    }
}
