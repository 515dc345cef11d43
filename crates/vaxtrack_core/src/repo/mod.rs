//! Persistence layer: blob stores and the vaccine collection gateway.
//!
//! # Responsibility
//! - Define the key-value contract the core needs from storage.
//! - Isolate SQLite and JSON details from service orchestration.
//!
//! # Invariants
//! - The vaccine collection is read and written as a single blob.

pub mod kv_repo;
pub mod vaccine_store;
