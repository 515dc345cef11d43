//! Editable form state for the add/edit flows.
//!
//! # Responsibility
//! - Hold what the user typed before it becomes a `Vaccine`.
//! - Validate edit-time rules that are not stored invariants.
//!
//! # Invariants
//! - A draft only turns into a `Vaccine` through `into_vaccine`, which runs
//!   `validate` first.
//! - Loading an existing vaccine into a draft and saving it unchanged yields
//!   the same renewal date.

use super::vaccine::{Renewal, Vaccine, VaccineId};
use crate::renewal::{RenewalInterval, MAX_RENEWAL_MONTHS, MAX_RENEWAL_YEARS};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Edit-time validation failure; recoverable by correcting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValidationError {
    EmptyName,
    FutureDate {
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    EmptyRenewalInterval,
    RenewalIntervalOutOfRange(RenewalInterval),
}

impl Display for DraftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "vaccine name cannot be empty"),
            Self::FutureDate { date, now } => write!(
                f,
                "vaccination date {} cannot be later than {}",
                date.date_naive(),
                now.date_naive()
            ),
            Self::EmptyRenewalInterval => write!(f, "renewal interval cannot be empty"),
            Self::RenewalIntervalOutOfRange(interval) => write!(
                f,
                "renewal interval {}y {}m exceeds {MAX_RENEWAL_YEARS}y {MAX_RENEWAL_MONTHS}m",
                interval.years, interval.months
            ),
        }
    }
}

impl Error for DraftValidationError {}

/// Form-level editable vaccine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccineDraft {
    /// `Some` when editing an existing record.
    pub existing_id: Option<VaccineId>,
    pub name: String,
    pub date: DateTime<Utc>,
    /// `None` means the renewal toggle is off.
    pub renewal: Option<RenewalInterval>,
}

impl VaccineDraft {
    /// Empty draft for the add flow.
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            existing_id: None,
            name: name.into(),
            date,
            renewal: None,
        }
    }

    /// Draft pre-filled from an existing record for the edit flow.
    pub fn from_vaccine(vaccine: &Vaccine) -> Self {
        Self {
            existing_id: Some(vaccine.id()),
            name: vaccine.name.clone(),
            date: vaccine.date,
            renewal: vaccine
                .renewal_date()
                .map(|renewal_date| RenewalInterval::between(vaccine.date, renewal_date)),
        }
    }

    pub fn with_renewal(mut self, interval: RenewalInterval) -> Self {
        self.renewal = Some(interval);
        self
    }

    /// Turns renewal tracking off.
    pub fn without_renewal(mut self) -> Self {
        self.renewal = None;
        self
    }

    /// Checks every edit-time rule, reporting the first violation.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), DraftValidationError> {
        if self.name.trim().is_empty() {
            return Err(DraftValidationError::EmptyName);
        }
        if self.date > now {
            return Err(DraftValidationError::FutureDate {
                date: self.date,
                now,
            });
        }
        if let Some(interval) = self.renewal {
            if interval.is_empty() {
                return Err(DraftValidationError::EmptyRenewalInterval);
            }
            if !interval.is_within_picker_bounds() {
                return Err(DraftValidationError::RenewalIntervalOutOfRange(interval));
            }
        }
        Ok(())
    }

    /// Validates and builds the record to persist.
    ///
    /// Keeps `existing_id` when present, otherwise assigns a fresh id. The
    /// renewal date is always recomputed from `date + interval`.
    pub fn into_vaccine(self, now: DateTime<Utc>) -> Result<Vaccine, DraftValidationError> {
        self.validate(now)?;

        let renewal = match self.renewal {
            Some(interval) => Renewal::RenewalOn(interval.apply(self.date)),
            None => Renewal::NoRenewal,
        };
        let name = self.name.trim().to_string();

        Ok(match self.existing_id {
            Some(id) => Vaccine::with_id(id, name, self.date, renewal),
            None => Vaccine::new(name, self.date, renewal),
        })
    }
}
