//! Client record model and pure lifecycle transitions.
//!
//! # Responsibility
//! - Define `Client`, its interval specification and history entries.
//! - Express create/confirm/note/edit transitions as pure functions.
//!
//! # Invariants
//! - `owner_id` is set at creation and never changes afterwards.
//! - `history` grows by append or shrinks by exact-id removal, never
//!   reordered in storage.
//! - `interval.value >= 1` for every constructed `IntervalSpec`.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::schedule::engine::compute_next_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Store-assigned identifier for a persisted client record.
///
/// Absent until the store accepts the record; kept as a type alias to make
/// semantic intent explicit in signatures.
pub type ClientId = Uuid;

/// Stable surrogate identifier for one history entry.
pub type EntryId = Uuid;

/// Opaque identity-provider user id scoping all client queries.
pub type OwnerId = String;

/// Width of the numeric part of generated client codes (`A001`).
const CLIENT_CODE_PAD: usize = 3;

/// Business days substituted for one calendar month when normalizing
/// legacy months-only intervals.
const BUSINESS_DAYS_PER_LEGACY_MONTH: u32 = 22;

/// Input validation failure surfaced synchronously to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Client name is empty or whitespace-only.
    EmptyName,
    /// Note text is empty or whitespace-only.
    EmptyNote,
    /// Interval magnitude is zero.
    NonPositiveInterval,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "client name must not be empty"),
            Self::EmptyNote => write!(f, "note text must not be empty"),
            Self::NonPositiveInterval => write!(f, "interval value must be at least 1"),
        }
    }
}

impl Error for ValidationError {}

/// Recurrence cadence unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    /// Business days; Saturday and Sunday never count.
    Days,
    /// Calendar months with end-of-month clamping.
    Months,
}

/// Recurrence cadence: magnitude plus unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSpec {
    pub value: u32,
    pub unit: IntervalUnit,
}

impl IntervalSpec {
    /// Builds a validated interval; zero magnitudes are rejected.
    pub fn new(value: u32, unit: IntervalUnit) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::NonPositiveInterval);
        }
        Ok(Self { value, unit })
    }

    /// Normalizes the legacy months-only representation.
    ///
    /// Old store documents carry a bare `monthsInterval`; such records are
    /// treated as `months * 22` business days on ingestion.
    pub fn from_legacy_months(months: u32) -> Result<Self, ValidationError> {
        Self::new(
            months.saturating_mul(BUSINESS_DAYS_PER_LEGACY_MONTH),
            IntervalUnit::Days,
        )
    }
}

/// One append-only history entry: a completed service or a free-form note.
///
/// `id` is the deletion target. Two entries entered in the same instant
/// with identical text stay distinguishable through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    /// `None` for plain maintenance confirmations.
    pub note: Option<String>,
}

impl MaintenanceRecord {
    fn service(timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            note: None,
        }
    }

    fn note(timestamp: DateTime<Utc>, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            note: Some(text),
        }
    }
}

/// Contact fields supplied when creating a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub job: String,
}

/// Partial contact update; `None` fields are left untouched.
///
/// Deliberately excludes interval and due date: contact edits are never
/// date-relevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub job: Option<String>,
}

/// Canonical client record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Store-assigned id; `None` until the record is first persisted.
    pub id: Option<ClientId>,
    /// Short display code, unique within the owner's scope.
    pub code: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Free-text job description.
    pub job: String,
    pub interval: IntervalSpec,
    /// Always the output of the scheduling engine.
    pub next_maintenance_date: DateTime<Utc>,
    pub owner_id: OwnerId,
    /// Append-only service/notes log, oldest first.
    pub history: Vec<MaintenanceRecord>,
}

impl Client {
    /// Creates a fresh, not-yet-persisted client record.
    ///
    /// # Contract
    /// - `existing_count` is the number of clients the owner already has;
    ///   the display code becomes `"A" + zero_pad(existing_count + 1)`.
    /// - `next_maintenance_date` is computed from `interval` and `now`.
    /// - History starts empty.
    ///
    /// # Errors
    /// - `ValidationError::EmptyName` when the draft name is blank.
    pub fn new(
        draft: ClientDraft,
        interval: IntervalSpec,
        owner_id: OwnerId,
        existing_count: usize,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Self {
            id: None,
            code: format_client_code(existing_count + 1),
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            job: draft.job,
            interval,
            next_maintenance_date: compute_next_date(&interval, now),
            owner_id,
            history: Vec::new(),
        })
    }

    /// Records a completed service.
    ///
    /// Recomputes the due date from the client's own interval and appends a
    /// no-note service entry. Calling twice with the same `now` yields the
    /// same due date both times; the date never advances twice.
    pub fn confirm_maintenance(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.next_maintenance_date = compute_next_date(&self.interval, now);
        next.history.push(MaintenanceRecord::service(now));
        next
    }

    /// Appends a free-form note to the history.
    ///
    /// # Errors
    /// - `ValidationError::EmptyNote` when `text` is blank.
    pub fn append_note(
        &self,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyNote);
        }

        let mut next = self.clone();
        next.history.push(MaintenanceRecord::note(now, text));
        Ok(next)
    }

    /// Removes the history entry with the given id.
    ///
    /// Idempotent: when no entry matches, the record is returned unchanged
    /// rather than failing.
    pub fn remove_note(&self, entry_id: EntryId) -> Self {
        let mut next = self.clone();
        next.history.retain(|entry| entry.id != entry_id);
        next
    }

    /// Applies a partial contact update.
    ///
    /// Interval and due date are untouched by design.
    ///
    /// # Errors
    /// - `ValidationError::EmptyName` when renaming to a blank name.
    pub fn edit_contact(&self, update: ContactUpdate) -> Result<Self, ValidationError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
        }

        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(phone) = update.phone {
            next.phone = phone;
        }
        if let Some(email) = update.email {
            next.email = email;
        }
        if let Some(address) = update.address {
            next.address = address;
        }
        if let Some(job) = update.job {
            next.job = job;
        }
        Ok(next)
    }
}

/// Formats the sequential display code, e.g. `A001` for index 1.
pub fn format_client_code(index: usize) -> String {
    format!("A{index:0width$}", width = CLIENT_CODE_PAD)
}

#[cfg(test)]
mod tests {
    use super::{format_client_code, IntervalSpec, IntervalUnit, ValidationError};

    #[test]
    fn interval_rejects_zero_value() {
        let err = IntervalSpec::new(0, IntervalUnit::Days).unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveInterval);
    }

    #[test]
    fn legacy_months_normalize_to_business_days() {
        let interval = IntervalSpec::from_legacy_months(3).unwrap();
        assert_eq!(interval.value, 66);
        assert_eq!(interval.unit, IntervalUnit::Days);
    }

    #[test]
    fn client_code_is_zero_padded_and_prefixed() {
        assert_eq!(format_client_code(1), "A001");
        assert_eq!(format_client_code(42), "A042");
        assert_eq!(format_client_code(1234), "A1234");
    }
}
