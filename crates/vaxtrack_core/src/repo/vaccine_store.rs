//! Vaccine collection persistence over a key-value blob store.
//!
//! # Responsibility
//! - Load and save the whole vaccine collection as one JSON blob.
//!
//! # Invariants
//! - `load` never fails: missing, unreadable or corrupt data yields an empty
//!   collection.
//! - `save` is best-effort: failures are logged and dropped.
//! - The collection is always written in full; there is no partial update.

use super::kv_repo::{KeyValueStore, RepoResult};
use crate::model::vaccine::Vaccine;
use log::{debug, error, warn};

/// Key holding the serialized collection.
pub const VACCINES_KEY: &str = "savedVaccines";

/// Persistence gateway for the vaccine collection.
pub struct VaccineStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> VaccineStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the stored collection, or an empty one on any failure.
    pub fn load(&self) -> Vec<Vaccine> {
        match self.try_load() {
            Ok(vaccines) => {
                debug!(
                    "event=vaccines_load module=repo status=ok count={}",
                    vaccines.len()
                );
                vaccines
            }
            Err(err) => {
                warn!(
                    "event=vaccines_load module=repo status=error error_code=load_failed error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    /// Replaces the stored collection; failures are not reported.
    pub fn save(&self, vaccines: &[Vaccine]) {
        match self.try_save(vaccines) {
            Ok(()) => debug!(
                "event=vaccines_save module=repo status=ok count={}",
                vaccines.len()
            ),
            Err(err) => error!(
                "event=vaccines_save module=repo status=error error_code=save_failed count={} error={}",
                vaccines.len(),
                err
            ),
        }
    }

    /// Load variant that surfaces the underlying failure.
    pub fn try_load(&self) -> RepoResult<Vec<Vaccine>> {
        match self.store.get(VACCINES_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Save variant that surfaces the underlying failure.
    pub fn try_save(&self, vaccines: &[Vaccine]) -> RepoResult<()> {
        let bytes = serde_json::to_vec(vaccines)?;
        self.store.put(VACCINES_KEY, &bytes)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
