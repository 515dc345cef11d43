//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage and reminder calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod vaccine_service;
