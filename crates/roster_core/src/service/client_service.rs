//! Client record manager.
//!
//! # Responsibility
//! - Validate input, run the pure record transitions, persist the result.
//! - Return the new record state so the session can treat it as its
//!   single source of truth (the store is refreshed on demand, not
//!   subscribed to).
//!
//! # Invariants
//! - Every mutation follows read-modify-write with last-write-wins; no
//!   optimistic concurrency check, serialization is the caller's job.
//! - `next_maintenance_date` only changes through `confirm_maintenance`.
//! - Store failures propagate unmodified; nothing here retries.

use crate::model::client::{
    Client, ClientDraft, ClientId, ContactUpdate, EntryId, IntervalSpec, OwnerId, ValidationError,
};
use crate::repo::client_store::{ClientStore, StoreError};
use crate::schedule::engine::{urgency_counts, UrgencyCounts};
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for client record use-cases.
#[derive(Debug)]
pub enum ClientServiceError {
    /// Input rejected before any transition ran.
    Validation(ValidationError),
    /// Target record is absent from the store.
    ClientNotFound(ClientId),
    /// Mutation requested on a record that was never persisted.
    NotPersisted,
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ClientServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ClientNotFound(id) => write!(f, "client not found: {id}"),
            Self::NotPersisted => write!(f, "client has no store id yet; create it first"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ClientServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ClientServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ClientServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::ClientNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Record manager facade over a store implementation.
pub struct ClientService<S: ClientStore> {
    store: S,
}

impl<S: ClientStore> ClientService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates and persists a new client record.
    ///
    /// # Contract
    /// - Name must be non-empty.
    /// - The display code is derived from the owner's current client
    ///   count plus one (`A001`, `A002`, ...). Counting happens at call
    ///   time; concurrent creates or prior deletions can collide, which
    ///   matches the external store's accepted semantics.
    /// - The returned record carries the store-assigned id.
    pub fn create_client(
        &self,
        draft: ClientDraft,
        interval: IntervalSpec,
        owner_id: OwnerId,
        now: DateTime<Utc>,
    ) -> Result<Client, ClientServiceError> {
        let existing_count = self.store.list(&owner_id)?.len();
        let mut client = Client::new(draft, interval, owner_id, existing_count, now)?;

        let id = self.store.create(&client)?;
        client.id = Some(id);

        info!(
            "event=client_created module=service status=ok client_id={id} code={}",
            client.code
        );
        Ok(client)
    }

    /// Records a completed service: advances the due date, logs a history
    /// entry, persists, and returns the new state.
    pub fn confirm_maintenance(
        &self,
        client: &Client,
        now: DateTime<Utc>,
    ) -> Result<Client, ClientServiceError> {
        let id = persisted_id(client)?;
        let next = client.confirm_maintenance(now);
        self.store.update(id, &next)?;
        Ok(next)
    }

    /// Appends a note to the record's history and persists.
    pub fn append_note(
        &self,
        client: &Client,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Client, ClientServiceError> {
        let id = persisted_id(client)?;
        let next = client.append_note(text, now)?;
        self.store.update(id, &next)?;
        Ok(next)
    }

    /// Removes one history entry by id and persists.
    ///
    /// A missing entry is a no-op on the history, but the write still
    /// happens, keeping read-your-writes semantics simple.
    pub fn remove_note(
        &self,
        client: &Client,
        entry_id: EntryId,
    ) -> Result<Client, ClientServiceError> {
        let id = persisted_id(client)?;
        let next = client.remove_note(entry_id);
        self.store.update(id, &next)?;
        Ok(next)
    }

    /// Applies a contact-field update and persists. Dates never move here.
    pub fn edit_contact(
        &self,
        client: &Client,
        update: ContactUpdate,
    ) -> Result<Client, ClientServiceError> {
        let id = persisted_id(client)?;
        let next = client.edit_contact(update)?;
        self.store.update(id, &next)?;
        Ok(next)
    }

    /// Deletes the record permanently. Terminal; no undo.
    pub fn delete_client(&self, client: &Client) -> Result<(), ClientServiceError> {
        let id = persisted_id(client)?;
        self.store.delete(id)?;
        info!("event=client_deleted module=service status=ok client_id={id}");
        Ok(())
    }

    /// Lists all records in the owner's scope.
    pub fn list_clients(&self, owner_id: &str) -> Result<Vec<Client>, ClientServiceError> {
        Ok(self.store.list(owner_id)?)
    }

    /// Per-tier counts across the owner's roster, for overview badges.
    pub fn urgency_summary(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<UrgencyCounts, ClientServiceError> {
        let clients = self.store.list(owner_id)?;
        Ok(urgency_counts(
            clients.iter().map(|client| client.next_maintenance_date),
            now,
        ))
    }
}

fn persisted_id(client: &Client) -> Result<ClientId, ClientServiceError> {
    client.id.ok_or(ClientServiceError::NotPersisted)
}
