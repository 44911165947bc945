//! Persistence collaborators for client records.
//!
//! # Responsibility
//! - Define the abstract store contract the record manager depends on.
//! - Keep SQL details inside the store implementation boundary.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod client_store;
