//! In-memory stores backing the API.
//!
//! [`CatalogStore`] hands out `Arc<Catalog>` snapshots; an import swaps the
//! pointer, so a request keeps the snapshot it started with. [`ProgressStore`]
//! holds per-user progress records and [`ProfileStore`] per-user bonus
//! profiles.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use grindtracker_core::bonus::BonusProfile;
use grindtracker_core::catalog::Catalog;
use grindtracker_core::error::CoreError;
use grindtracker_core::progress::{to_progress_map, ProgressMap, ProgressRecord, ProgressReport};
use grindtracker_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog as of now. Later imports do not affect the returned value.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&*self.current.read().await)
    }

    /// Install a new catalog, returning the one it replaced.
    pub async fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Outcome of [`ProgressStore::report`].
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub record: ProgressRecord,
    pub created: bool,
}

#[derive(Debug, Default)]
pub struct ProgressStore {
    /// user id -> vehicle id -> record.
    users: RwLock<HashMap<DbId, BTreeMap<DbId, ProgressRecord>>>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records for a user, ordered by vehicle id.
    pub async fn list(&self, user_id: DbId) -> Vec<ProgressRecord> {
        self.users
            .read()
            .await
            .get(&user_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn get(&self, user_id: DbId, vehicle_id: DbId) -> Option<ProgressRecord> {
        self.users
            .read()
            .await
            .get(&user_id)
            .and_then(|m| m.get(&vehicle_id))
            .cloned()
    }

    /// Create or update the record for `(user_id, vehicle_id)`.
    pub async fn report(
        &self,
        user_id: DbId,
        vehicle_id: DbId,
        report: &ProgressReport,
        rp_cost: Option<i64>,
        now: Timestamp,
    ) -> Result<UpsertOutcome, CoreError> {
        let mut users = self.users.write().await;
        let records = users.entry(user_id).or_default();
        let existing = records.get(&vehicle_id);
        let created = existing.is_none();
        let record = ProgressRecord::apply_report(existing, vehicle_id, report, rp_cost, now)?;
        records.insert(vehicle_id, record.clone());
        Ok(UpsertOutcome { record, created })
    }

    /// Forget one record. Returns whether anything was removed.
    pub async fn remove(&self, user_id: DbId, vehicle_id: DbId) -> bool {
        let mut users = self.users.write().await;
        let Some(records) = users.get_mut(&user_id) else {
            return false;
        };
        let removed = records.remove(&vehicle_id).is_some();
        if records.is_empty() {
            users.remove(&user_id);
        }
        removed
    }

    /// The user's progress in estimator form.
    pub async fn progress_map(&self, user_id: DbId) -> ProgressMap {
        self.users
            .read()
            .await
            .get(&user_id)
            .map(|m| to_progress_map(m.values()))
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<DbId, BonusProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: DbId) -> Option<BonusProfile> {
        self.profiles.read().await.get(&user_id).cloned()
    }

    /// Validate and store the user's profile. Returns `true` when the user
    /// had no profile before.
    pub async fn put(&self, user_id: DbId, profile: BonusProfile) -> Result<bool, CoreError> {
        profile.validate()?;
        Ok(self
            .profiles
            .write()
            .await
            .insert(user_id, profile)
            .is_none())
    }
}
