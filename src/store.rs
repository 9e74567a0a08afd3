//! Durable link storage on top of the embedded redb database
//!
//! This module owns the database tables and every transaction against them.
//! All uniqueness and hit-counting guarantees live here: redb allows a single
//! write transaction at a time, so the check-and-insert in [`LinkStore::try_create`]
//! and the read-modify-write in [`LinkStore::record_hit`] are atomic without
//! any locking in the layers above.

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::model::Link;

/// Main table for link records
///
/// Key: short code as string
/// Value: JSON-serialized Link as string
///
/// Example:
/// - Key: "Abc123"
/// - Value: '{"id":"3f1c...","code":"Abc123","target":"https://example.com",...}'
pub const TABLE_LINKS: TableDefinition<&str, &str> = TableDefinition::new("links_v1");

/// Secondary index for listing links newest-first
///
/// Key: Composite key in format "{timestamp_micros:020}:{code}"
/// Value: the short code
///
/// The zero-padded timestamp makes lexicographic order equal chronological
/// order, so a reverse range scan yields links newest first. The code suffix
/// keeps keys unique when two links share a creation timestamp. The value is
/// only the code, so hit updates on the main record never leave the index
/// stale.
pub const TABLE_CREATED_INDEX: TableDefinition<&str, &str> =
    TableDefinition::new("created_index_v1");

/// Errors surfaced by the store layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// The code is already taken by a live record
    #[error("code already exists")]
    AlreadyExists,

    /// No live record for the code
    #[error("link not found")]
    NotFound,

    /// Underlying database failure
    #[error("database error: {0}")]
    Backend(#[from] redb::Error),

    /// A stored record failed to (de)serialize
    #[error("corrupt link record: {0}")]
    Codec(#[from] serde_json::Error),
}

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        StoreError::Backend(err.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        StoreError::Backend(err.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        StoreError::Backend(err.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        StoreError::Backend(err.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        StoreError::Backend(err.into())
    }
}

/// Handle to the link store, cheap to clone and share across handlers
///
/// The store is injected into the service and resolver at construction; there
/// is no process-global database instance.
#[derive(Clone)]
pub struct LinkStore {
    db: Arc<Database>,
}

impl LinkStore {
    /// Creates or opens the database file and ensures both tables exist.
    ///
    /// # Arguments
    ///
    /// * `db_path` - File path where the database is stored (e.g., "data.db")
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        let db = Database::create(db_path)?;

        // Open both tables once so later read transactions find them
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(TABLE_LINKS)?;
            write_txn.open_table(TABLE_CREATED_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Atomically inserts a new link if the code is free.
    ///
    /// Assigns the record id and creation timestamp, writes the main record
    /// and its index entry, and commits. Returns [`StoreError::AlreadyExists`]
    /// without writing anything if the code is taken. The existence check and
    /// the insert happen inside one write transaction, so two concurrent
    /// creations of the same code cannot both succeed.
    pub fn try_create(&self, code: &str, target: &str) -> Result<Link, StoreError> {
        let link = Link {
            id: Uuid::new_v4().to_string(),
            code: code.to_string(),
            target: target.to_string(),
            hit_count: 0,
            last_hit_at: None,
            created_at: Utc::now(),
        };
        let record_json = serde_json::to_string(&link)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table_links = write_txn.open_table(TABLE_LINKS)?;
            if table_links.get(code)?.is_some() {
                return Err(StoreError::AlreadyExists);
            }
            table_links.insert(code, record_json.as_str())?;

            let index_key = created_index_key(&link);
            let mut table_index = write_txn.open_table(TABLE_CREATED_INDEX)?;
            table_index.insert(index_key.as_str(), code)?;
        }
        write_txn.commit()?;

        Ok(link)
    }

    /// Looks up a link by code. Returns `None` if no live record exists.
    pub fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_LINKS)?;

        match table.get(code)? {
            Some(guard) => Ok(Some(serde_json::from_str(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Lists all live links, newest first.
    ///
    /// Walks the creation-time index in reverse and resolves each entry
    /// against the main table within the same read transaction.
    pub fn list(&self) -> Result<Vec<Link>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table_links = read_txn.open_table(TABLE_LINKS)?;
        let table_index = read_txn.open_table(TABLE_CREATED_INDEX)?;

        let mut links = Vec::new();
        for entry in table_index.iter()?.rev() {
            let (_, code_guard) = entry?;
            if let Some(record) = table_links.get(code_guard.value())? {
                links.push(serde_json::from_str(record.value())?);
            }
        }

        Ok(links)
    }

    /// Atomically increments the hit counter and touches the last-hit time.
    ///
    /// Returns the updated record, or [`StoreError::NotFound`] if the code has
    /// no live record. Never creates a record. redb serializes write
    /// transactions, so concurrent hits on the same code each observe the
    /// previous count and no increment is lost.
    pub fn record_hit(&self, code: &str) -> Result<Link, StoreError> {
        let write_txn = self.db.begin_write()?;
        let link = {
            let mut table_links = write_txn.open_table(TABLE_LINKS)?;

            let existing = match table_links.get(code)? {
                Some(guard) => guard.value().to_string(),
                None => return Err(StoreError::NotFound),
            };

            let mut link: Link = serde_json::from_str(&existing)?;
            link.hit_count += 1;
            link.last_hit_at = Some(Utc::now());

            let record_json = serde_json::to_string(&link)?;
            table_links.insert(code, record_json.as_str())?;
            link
        };
        write_txn.commit()?;

        Ok(link)
    }

    /// Removes a link and its index entry.
    ///
    /// Hard delete: the record is gone and the code becomes available for
    /// reuse immediately. Returns [`StoreError::NotFound`] if the code has no
    /// live record.
    pub fn delete(&self, code: &str) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table_links = write_txn.open_table(TABLE_LINKS)?;

            let link: Link = match table_links.get(code)? {
                Some(guard) => serde_json::from_str(guard.value())?,
                None => return Err(StoreError::NotFound),
            };

            table_links.remove(code)?;

            let index_key = created_index_key(&link);
            let mut table_index = write_txn.open_table(TABLE_CREATED_INDEX)?;
            table_index.remove(index_key.as_str())?;
        }
        write_txn.commit()?;

        Ok(())
    }
}

/// Builds the composite key for the creation-time index.
fn created_index_key(link: &Link) -> String {
    format!("{:020}:{}", link.created_at.timestamp_micros(), link.code)
}
