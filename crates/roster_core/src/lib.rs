//! Core domain logic for the client maintenance roster.
//! This crate is the single source of truth for scheduling and record
//! invariants; storage and identity sit behind collaborator traits.

pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use identity::{
    IdentityError, IdentityHandle, IdentityProvider, StaticIdentityProvider, UserId,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{
    Client, ClientDraft, ClientId, ContactUpdate, EntryId, IntervalSpec, IntervalUnit,
    MaintenanceRecord, OwnerId, ValidationError,
};
pub use model::document::ClientDocument;
pub use repo::client_store::{ClientStore, SqliteClientStore, StoreError, StoreResult};
pub use schedule::engine::{
    classify_urgency, compute_next_date, days_until_due, urgency_counts, UrgencyCounts,
    UrgencyTier,
};
pub use service::client_service::{ClientService, ClientServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
