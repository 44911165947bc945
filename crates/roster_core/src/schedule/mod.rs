//! Maintenance scheduling and urgency classification.
//!
//! # Responsibility
//! - Compute the next due date from an interval specification.
//! - Classify records into ordered urgency tiers.
//!
//! # See also
//! - docs/architecture/scheduling.md

pub mod engine;
