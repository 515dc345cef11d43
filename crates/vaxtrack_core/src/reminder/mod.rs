//! Renewal reminders.
//!
//! # Responsibility
//! - Build one-shot reminder requests from vaccines.
//! - Forward schedule/cancel calls to an injected platform scheduler.
//!
//! # Invariants
//! - At most one pending reminder exists per vaccine id; scheduling replaces.
//! - Scheduling is fire-and-forget: scheduler failures are logged, never
//!   returned to callers.
//! - A vaccine without a renewal date never keeps a pending reminder.

mod sqlite;

pub use sqlite::SqliteReminderScheduler;

use crate::model::vaccine::{Vaccine, VaccineId};
use chrono::NaiveDate;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REMINDER_TITLE: &str = "Vaccine reminder";

/// One-shot alert firing on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    /// Reminder key; equals the vaccine id.
    pub id: VaccineId,
    pub title: String,
    pub body: String,
    pub fire_on: NaiveDate,
}

impl ReminderRequest {
    /// Builds the request for `vaccine`; `None` without a renewal date.
    pub fn for_vaccine(vaccine: &Vaccine) -> Option<Self> {
        let renewal_date = vaccine.renewal_date()?;
        Some(Self {
            id: vaccine.id(),
            title: REMINDER_TITLE.to_string(),
            body: format!("{} needs renewal", vaccine.name),
            fire_on: renewal_date.date_naive(),
        })
    }
}

/// Platform scheduler failure.
#[derive(Debug)]
pub enum ReminderError {
    /// The user has not granted notification permission.
    PermissionDenied,
    Backend(String),
}

impl Display for ReminderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission not granted"),
            Self::Backend(message) => write!(f, "reminder backend error: {message}"),
        }
    }
}

impl Error for ReminderError {}

impl From<rusqlite::Error> for ReminderError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(value.to_string())
    }
}

/// Platform reminder service as seen by the core.
pub trait ReminderScheduler {
    /// Registers `request`, replacing any pending request with the same id.
    fn add(&self, request: &ReminderRequest) -> Result<(), ReminderError>;
    /// Cancels pending requests; unknown ids are ignored.
    fn remove_pending(&self, ids: &[VaccineId]) -> Result<(), ReminderError>;
}

impl<T: ReminderScheduler + ?Sized> ReminderScheduler for &T {
    fn add(&self, request: &ReminderRequest) -> Result<(), ReminderError> {
        (**self).add(request)
    }

    fn remove_pending(&self, ids: &[VaccineId]) -> Result<(), ReminderError> {
        (**self).remove_pending(ids)
    }
}

/// Best-effort reminder gateway over an injected scheduler.
pub struct ReminderGateway<N: ReminderScheduler> {
    scheduler: N,
}

impl<N: ReminderScheduler> ReminderGateway<N> {
    pub fn new(scheduler: N) -> Self {
        Self { scheduler }
    }

    /// Schedules the renewal reminder for `vaccine`.
    ///
    /// Without a renewal date this behaves as `remove_reminder`.
    pub fn schedule_reminder(&self, vaccine: &Vaccine) {
        let Some(request) = ReminderRequest::for_vaccine(vaccine) else {
            self.remove_reminder(vaccine);
            return;
        };

        match self.scheduler.add(&request) {
            Ok(()) => debug!(
                "event=reminder_schedule module=reminder status=ok vaccine_id={} fire_on={}",
                request.id, request.fire_on
            ),
            Err(err) => warn!(
                "event=reminder_schedule module=reminder status=error vaccine_id={} error={}",
                request.id, err
            ),
        }
    }

    /// Cancels any pending reminder for `vaccine`.
    pub fn remove_reminder(&self, vaccine: &Vaccine) {
        let id = vaccine.id();
        match self.scheduler.remove_pending(&[id]) {
            Ok(()) => debug!(
                "event=reminder_remove module=reminder status=ok vaccine_id={}",
                id
            ),
            Err(err) => warn!(
                "event=reminder_remove module=reminder status=error vaccine_id={} error={}",
                id, err
            ),
        }
    }

    pub fn scheduler(&self) -> &N {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::ReminderRequest;
    use crate::model::vaccine::{Renewal, Vaccine};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn request_fires_on_renewal_day() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let renewal = Utc.with_ymd_and_hms(2027, 6, 1, 22, 45, 0).unwrap();
        let vaccine = Vaccine::new("TBE", date, Renewal::RenewalOn(renewal));

        let request = ReminderRequest::for_vaccine(&vaccine).expect("renewal exists");
        assert_eq!(request.id, vaccine.id());
        assert_eq!(request.fire_on, NaiveDate::from_ymd_opt(2027, 6, 1).unwrap());
        assert_eq!(request.body, "TBE needs renewal");
    }

    #[test]
    fn no_request_without_renewal() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let vaccine = Vaccine::new("TBE", date, Renewal::NoRenewal);
        assert!(ReminderRequest::for_vaccine(&vaccine).is_none());
    }
}
