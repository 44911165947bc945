//! Domain model for the maintenance roster.
//!
//! # Responsibility
//! - Define the canonical client record and its history entries.
//! - Provide pure lifecycle transitions; persistence lives in `repo`.
//!
//! # Invariants
//! - Every history entry carries a stable `EntryId`, never reused.
//! - `next_maintenance_date` is only ever produced by the scheduling
//!   engine, never hand-edited.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod client;
pub mod document;
