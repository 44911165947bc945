//! Client store contract and document-oriented SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD over persisted client documents.
//! - Assign store ids on create and keep `create` durable before
//!   returning.
//!
//! # Invariants
//! - Field values round-trip exactly through the document codec.
//! - Writes are last-write-wins; there is no optimistic concurrency
//!   check, serialization is the single-threaded caller's job.
//! - Read paths reject invalid persisted documents instead of masking
//!   them.

use crate::db::DbError;
use crate::model::client::{Client, ClientId, ValidationError};
use crate::model::document::{ClientDocument, DocumentError};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for client persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(ClientId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "client not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted client data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<DocumentError> for StoreError {
    fn from(value: DocumentError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Abstract store the record manager persists through.
///
/// Implementations must preserve field values exactly and make `create`
/// durable before returning the assigned id.
pub trait ClientStore {
    /// Lists all clients in one owner's scope, oldest first.
    fn list(&self, owner_id: &str) -> StoreResult<Vec<Client>>;
    /// Persists a new record and returns the store-assigned id.
    fn create(&self, client: &Client) -> StoreResult<ClientId>;
    /// Replaces the stored document for `id`.
    fn update(&self, id: ClientId, client: &Client) -> StoreResult<()>;
    /// Removes the record permanently. No tombstone, no undo.
    fn delete(&self, id: ClientId) -> StoreResult<()>;
    /// Fetches one record by id.
    fn get(&self, id: ClientId) -> StoreResult<Option<Client>>;
}

/// Document-oriented SQLite store: one JSON document per client row.
pub struct SqliteClientStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn encode(client: &Client) -> StoreResult<String> {
        serde_json::to_string(&ClientDocument::from_client(client))
            .map_err(|err| StoreError::InvalidData(format!("document encode failed: {err}")))
    }

    fn decode(id_text: &str, doc: &str) -> StoreResult<Client> {
        let id = Uuid::parse_str(id_text).map_err(|_| {
            StoreError::InvalidData(format!("invalid uuid value `{id_text}` in clients.id"))
        })?;
        let document: ClientDocument = serde_json::from_str(doc).map_err(|err| {
            StoreError::InvalidData(format!("undecodable document for client {id}: {err}"))
        })?;
        Ok(document.into_client(id)?)
    }
}

impl ClientStore for SqliteClientStore<'_> {
    fn list(&self, owner_id: &str) -> StoreResult<Vec<Client>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, doc FROM clients
             WHERE owner_id = ?1
             ORDER BY created_at ASC, id ASC;",
        )?;

        let mut rows = stmt.query([owner_id])?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let doc: String = row.get("doc")?;
            clients.push(Self::decode(&id_text, &doc)?);
        }

        Ok(clients)
    }

    fn create(&self, client: &Client) -> StoreResult<ClientId> {
        let id = Uuid::new_v4();
        let doc = Self::encode(client)?;

        self.conn.execute(
            "INSERT INTO clients (id, owner_id, doc) VALUES (?1, ?2, ?3);",
            params![id.to_string(), client.owner_id.as_str(), doc],
        )?;

        info!(
            "event=client_create module=store status=ok client_id={id} owner_id={}",
            client.owner_id
        );
        Ok(id)
    }

    fn update(&self, id: ClientId, client: &Client) -> StoreResult<()> {
        let doc = Self::encode(client)?;

        let changed = self.conn.execute(
            "UPDATE clients
             SET
                owner_id = ?1,
                doc = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![client.owner_id.as_str(), doc, id.to_string()],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!("event=client_update module=store status=ok client_id={id}");
        Ok(())
    }

    fn delete(&self, id: ClientId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM clients WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!("event=client_delete module=store status=ok client_id={id}");
        Ok(())
    }

    fn get(&self, id: ClientId) -> StoreResult<Option<Client>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, doc FROM clients WHERE id = ?1;",
                [id.to_string()],
                |row| {
                    let id_text: String = row.get("id")?;
                    let doc: String = row.get("doc")?;
                    Ok((id_text, doc))
                },
            )
            .optional()?;

        match row {
            Some((id_text, doc)) => Ok(Some(Self::decode(&id_text, &doc)?)),
            None => Ok(None),
        }
    }
}
