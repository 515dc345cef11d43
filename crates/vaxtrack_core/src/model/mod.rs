//! Vaccine domain model and derived projections.
//!
//! # Responsibility
//! - Define the canonical vaccination record.
//! - Derive status/attention/presentation values from it.
//! - Hold editable drafts and their edit-time validation.
//!
//! # Invariants
//! - Every record is identified by a stable `VaccineId`.
//! - Derived values take `now` as an explicit argument; nothing here reads
//!   the system clock.

pub mod draft;
pub mod status;
pub mod vaccine;
