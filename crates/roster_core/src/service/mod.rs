//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pure record transitions and store persistence.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod client_service;
