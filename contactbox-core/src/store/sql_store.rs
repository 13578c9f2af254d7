//! SQL-based storage implementation for contact messages

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::{FromSqlError, Type};
use rusqlite::{params, Row};
use std::path::Path;
use tracing::{debug, info};

use super::error::StoreError;
use super::schema::init_schema;
use crate::contact::{ContactRecord, NewContact};

/// SQL-based storage for contact messages
///
/// Cloning is cheap and shares the underlying pool. Every operation checks a
/// connection out for the duration of a single statement; the connection
/// goes back to the pool when the call returns, on success or error.
#[derive(Clone)]
pub struct ContactStore {
    pool: Pool<SqliteConnectionManager>,
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore").finish_non_exhaustive()
    }
}

impl ContactStore {
    /// Open (or create) the database file at `path`
    ///
    /// The schema is not touched; call [`ContactStore::initialize`] next.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(path.as_ref()).with_init(|conn| {
            // WAL lets readers proceed while a submission is being written.
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))
        });
        let pool = Pool::new(manager)?;

        debug!("Opened contact store at {}", path.as_ref().display());
        Ok(Self::from_pool(pool))
    }

    /// Create a store backed by a private in-memory database
    ///
    /// The pool holds a single connection, since each in-memory connection
    /// is its own database.
    pub fn memory() -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing connection pool
    pub fn from_pool(pool: Pool<SqliteConnectionManager>) -> Self {
        Self { pool }
    }

    /// Create the contacts table if absent. Idempotent.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        init_schema(&conn)?;

        info!("Contact store initialized");
        Ok(())
    }

    /// Insert a new contact, returning its server-assigned id
    pub fn insert(&self, contact: &NewContact) -> Result<i64, StoreError> {
        self.insert_with_timestamp(contact, Utc::now())
    }

    fn insert_with_timestamp(
        &self,
        contact: &NewContact,
        timestamp: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO contacts (name, email, subject, message, timestamp, ip_address)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                &contact.name,
                &contact.email,
                &contact.subject,
                &contact.message,
                timestamp.timestamp_millis(),
                &contact.ip_address,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// All contacts, newest first
    ///
    /// Records sharing a timestamp are ordered by id, so the later insert
    /// still comes first.
    pub fn list_all(&self) -> Result<Vec<ContactRecord>, StoreError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, email, subject, message, timestamp, ip_address
             FROM contacts
             ORDER BY timestamp DESC, id DESC",
        )?;

        let contacts = stmt
            .query_map([], row_to_contact)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(contacts)
    }

    /// Delete a contact by id
    ///
    /// Returns whether a row was removed. Unknown ids are not an error.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;

        let removed = conn.execute("DELETE FROM contacts WHERE id = ?", params![id])?;

        Ok(removed > 0)
    }

    /// Release the store. Outstanding clones keep the pool alive until they
    /// are dropped too.
    pub fn close(self) {
        let state = self.pool.state();
        debug!(
            connections = state.connections,
            idle = state.idle_connections,
            "Closing contact store"
        );
    }
}

fn row_to_contact(row: &Row<'_>) -> Result<ContactRecord, rusqlite::Error> {
    let millis: i64 = row.get(5)?;
    let timestamp = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Integer,
            Box::new(FromSqlError::OutOfRange(millis)),
        )
    })?;

    Ok(ContactRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        subject: row.get(3)?,
        message: row.get(4)?,
        timestamp,
        ip_address: row.get(6)?,
    })
}
