//! List view policies.
//!
//! # Responsibility
//! - Turn the stored collection into the visible sequence.
//!
//! # Invariants
//! - Policies are pure functions of `(collection, filter, now)`.

pub mod list;
