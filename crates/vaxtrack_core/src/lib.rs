//! Core domain logic for vaxtrack, a personal vaccination log.
//! This crate owns status derivation, renewal arithmetic and list policy;
//! storage and reminders are reached through injected collaborators.

pub mod db;
pub mod logging;
pub mod model;
pub mod policy;
pub mod reminder;
pub mod renewal;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingStatus};
pub use model::draft::{DraftValidationError, VaccineDraft};
pub use model::status::{
    derive_status, AttentionLevel, StatusColor, StatusIcon, StatusProjection, VaccineCategory,
    VaccineStatus, WARNING_WINDOW_DAYS,
};
pub use model::vaccine::{Renewal, SuggestedAction, Vaccine, VaccineId};
pub use policy::list::{compare, priority_rank, visible_vaccines, VaccineFilter};
pub use reminder::{
    ReminderError, ReminderGateway, ReminderRequest, ReminderScheduler, SqliteReminderScheduler,
};
pub use renewal::{compute_renewal_date, days_until, decompose_interval, RenewalInterval};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::vaccine_store::{VaccineStorage, VACCINES_KEY};
pub use service::vaccine_service::{ServiceResult, VaccineService, VaccineServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
