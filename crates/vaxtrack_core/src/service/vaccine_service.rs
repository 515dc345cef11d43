//! Vaccine use-case service.
//!
//! # Responsibility
//! - Provide add/edit/delete/list entry points for the presentation layer.
//! - Keep reminders in sync with the stored collection.
//!
//! # Invariants
//! - Every mutation is read-modify-write of the entire collection.
//! - Reminder calls happen before the collection is persisted.
//! - Only validation and not-found errors reach callers; storage and
//!   reminder failures are logged and swallowed.

use crate::model::draft::{DraftValidationError, VaccineDraft};
use crate::model::vaccine::{Vaccine, VaccineId};
use crate::policy::list::{visible_vaccines, VaccineFilter};
use crate::reminder::{ReminderGateway, ReminderScheduler};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::vaccine_store::VaccineStorage;
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for vaccine use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaccineServiceError {
    Validation(DraftValidationError),
    NotFound(VaccineId),
}

impl Display for VaccineServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "vaccine not found: {id}"),
        }
    }
}

impl Error for VaccineServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<DraftValidationError> for VaccineServiceError {
    fn from(value: DraftValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type ServiceResult<T> = Result<T, VaccineServiceError>;

/// Use-case facade over storage and reminder collaborators.
pub struct VaccineService<S: KeyValueStore, N: ReminderScheduler> {
    storage: VaccineStorage<S>,
    reminders: ReminderGateway<N>,
}

impl<S: KeyValueStore, N: ReminderScheduler> VaccineService<S, N> {
    pub fn new(store: S, scheduler: N) -> Self {
        Self {
            storage: VaccineStorage::new(store),
            reminders: ReminderGateway::new(scheduler),
        }
    }

    /// Full stored collection in persisted order.
    pub fn all(&self) -> Vec<Vaccine> {
        self.storage.load()
    }

    /// Visible sequence for `filter` at `now`.
    pub fn list(&self, filter: VaccineFilter, now: DateTime<Utc>) -> Vec<Vaccine> {
        visible_vaccines(&self.storage.load(), filter, now)
    }

    pub fn get(&self, id: VaccineId) -> Option<Vaccine> {
        self.storage
            .load()
            .into_iter()
            .find(|vaccine| vaccine.id() == id)
    }

    /// Validates a new-entry draft and appends the resulting record.
    pub fn add(&self, draft: VaccineDraft, now: DateTime<Utc>) -> ServiceResult<Vaccine> {
        let draft = VaccineDraft {
            existing_id: None,
            ..draft
        };
        let vaccine = draft.into_vaccine(now)?;
        self.upsert(vaccine.clone());
        info!(
            "event=vaccine_add module=service status=ok vaccine_id={} has_renewal={}",
            vaccine.id(),
            vaccine.has_renewal()
        );
        Ok(vaccine)
    }

    /// Validates an edit draft and replaces the record with the same id.
    pub fn update(&self, draft: VaccineDraft, now: DateTime<Utc>) -> ServiceResult<Vaccine> {
        let Some(id) = draft.existing_id else {
            return self.add(draft, now);
        };
        if self.get(id).is_none() {
            return Err(VaccineServiceError::NotFound(id));
        }

        let vaccine = draft.into_vaccine(now)?;
        self.upsert(vaccine.clone());
        info!(
            "event=vaccine_update module=service status=ok vaccine_id={} has_renewal={}",
            vaccine.id(),
            vaccine.has_renewal()
        );
        Ok(vaccine)
    }

    /// Replaces the record with the same id, or appends it.
    ///
    /// Reschedules the reminder, then persists the full collection.
    pub fn upsert(&self, vaccine: Vaccine) {
        let mut vaccines = self.storage.load();
        match vaccines.iter_mut().find(|stored| stored.id() == vaccine.id()) {
            Some(stored) => *stored = vaccine.clone(),
            None => vaccines.push(vaccine.clone()),
        }

        self.reminders.schedule_reminder(&vaccine);
        self.storage.save(&vaccines);
    }

    /// Removes one record and cancels its reminder.
    pub fn delete(&self, id: VaccineId) -> ServiceResult<Vaccine> {
        let mut vaccines = self.storage.load();
        let Some(index) = vaccines.iter().position(|stored| stored.id() == id) else {
            return Err(VaccineServiceError::NotFound(id));
        };

        let removed = vaccines.remove(index);
        self.reminders.remove_reminder(&removed);
        self.storage.save(&vaccines);
        info!("event=vaccine_delete module=service status=ok vaccine_id={id}");
        Ok(removed)
    }

    /// Deletes rows addressed by position in the visible sequence.
    ///
    /// Offsets outside the visible sequence are ignored.
    pub fn delete_visible(
        &self,
        filter: VaccineFilter,
        now: DateTime<Utc>,
        offsets: &[usize],
    ) -> Vec<Vaccine> {
        let visible = self.list(filter, now);
        let mut targets: Vec<VaccineId> = offsets
            .iter()
            .filter_map(|offset| visible.get(*offset).map(Vaccine::id))
            .collect();
        targets.sort_unstable();
        targets.dedup();

        targets
            .into_iter()
            .filter_map(|id| self.delete(id).ok())
            .collect()
    }

    pub fn storage(&self) -> &VaccineStorage<S> {
        &self.storage
    }

    pub fn reminders(&self) -> &ReminderGateway<N> {
        &self.reminders
    }
}
