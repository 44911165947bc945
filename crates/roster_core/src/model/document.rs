//! Store-document codec for client records.
//!
//! # Responsibility
//! - Serialize clients into the camelCase document shape the external
//!   store uses (`code`, `name`, ..., `maintenanceDate`, `ownerId`,
//!   `history[]`).
//! - Normalize legacy documents on ingestion: bare `monthsInterval`
//!   becomes a business-day interval, history entries without a surrogate
//!   id get one assigned.
//!
//! # Invariants
//! - Serialization always emits the normalized `interval` field; the
//!   legacy `monthsInterval` is accepted on read and never written back.
//! - Field values round-trip exactly; no implicit coercion.

use crate::model::client::{
    Client, ClientId, EntryId, IntervalSpec, MaintenanceRecord, OwnerId, ValidationError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Document-decode failure.
#[derive(Debug)]
pub enum DocumentError {
    /// Neither `interval` nor legacy `monthsInterval` present, or the
    /// stored interval fails validation.
    InvalidInterval(ValidationError),
    /// `maintenanceDate` or a history `date` is not valid RFC 3339.
    InvalidTimestamp(String),
    /// Document is missing an interval entirely.
    MissingInterval,
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInterval(err) => write!(f, "invalid stored interval: {err}"),
            Self::InvalidTimestamp(value) => {
                write!(f, "invalid stored timestamp `{value}`: expected RFC 3339")
            }
            Self::MissingInterval => {
                write!(f, "document has neither `interval` nor `monthsInterval`")
            }
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInterval(err) => Some(err),
            _ => None,
        }
    }
}

/// External document shape for one history entry.
///
/// Legacy documents carry only `date` and `note`; `entryId` was introduced
/// with surrogate ids and is optional on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<EntryId>,
    pub date: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// External document shape for one client record.
///
/// The store-assigned id lives outside the document (row key), matching
/// the external store's convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDocument {
    pub code: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub job: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<IntervalSpec>,
    /// Legacy months-only cadence; read-only compatibility field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_interval: Option<u32>,
    pub maintenance_date: String,
    pub owner_id: OwnerId,
    #[serde(default)]
    pub history: Vec<HistoryEntryDocument>,
}

impl ClientDocument {
    /// Encodes a client into the external document shape.
    ///
    /// Always writes the normalized `interval`; never emits the legacy
    /// `monthsInterval` field.
    pub fn from_client(client: &Client) -> Self {
        Self {
            code: client.code.clone(),
            name: client.name.clone(),
            phone: client.phone.clone(),
            email: client.email.clone(),
            address: client.address.clone(),
            job: client.job.clone(),
            interval: Some(client.interval),
            months_interval: None,
            maintenance_date: client.next_maintenance_date.to_rfc3339(),
            owner_id: client.owner_id.clone(),
            history: client
                .history
                .iter()
                .map(|entry| HistoryEntryDocument {
                    entry_id: Some(entry.id),
                    date: entry.timestamp.to_rfc3339(),
                    note: entry.note.clone(),
                })
                .collect(),
        }
    }

    /// Decodes a stored document into the canonical client record.
    ///
    /// # Contract
    /// - `interval` wins when both representations are present.
    /// - A bare `monthsInterval` of `m` normalizes to `m * 22` business
    ///   days.
    /// - History entries without an `entryId` get a fresh surrogate id.
    pub fn into_client(self, id: ClientId) -> Result<Client, DocumentError> {
        let interval = match (self.interval, self.months_interval) {
            (Some(interval), _) => IntervalSpec::new(interval.value, interval.unit)
                .map_err(DocumentError::InvalidInterval)?,
            (None, Some(months)) => IntervalSpec::from_legacy_months(months)
                .map_err(DocumentError::InvalidInterval)?,
            (None, None) => return Err(DocumentError::MissingInterval),
        };

        let next_maintenance_date = parse_instant(&self.maintenance_date)?;

        let mut history = Vec::with_capacity(self.history.len());
        for entry in self.history {
            history.push(MaintenanceRecord {
                id: entry.entry_id.unwrap_or_else(Uuid::new_v4),
                timestamp: parse_instant(&entry.date)?,
                note: entry.note,
            });
        }

        Ok(Client {
            id: Some(id),
            code: self.code,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            job: self.job,
            interval,
            next_maintenance_date,
            owner_id: self.owner_id,
            history,
        })
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, DocumentError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| DocumentError::InvalidTimestamp(value.to_string()))
}
