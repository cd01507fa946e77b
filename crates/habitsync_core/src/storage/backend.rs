//! Synchronous string key-value backends.
//!
//! # Responsibility
//! - Abstract the host's get/set/remove-by-key storage primitive.
//! - Provide a durable SQLite backend and an in-process memory backend.
//!
//! # Invariants
//! - `set` overwrites the whole value for a key.
//! - `remove` on a missing key is not an error.
//! - `remove_all` removes every listed key or none (SQLite backend).

use crate::db::migrations::{current_version, latest_version};
use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type BackendResult<T> = Result<T, BackendError>;

#[derive(Debug)]
pub enum BackendError {
    Db(DbError),
    /// Connection was not bootstrapped through `db::open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for BackendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for BackendError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BackendError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Host storage primitive: string values addressed by string keys.
pub trait KvBackend {
    fn get(&self, key: &str) -> BackendResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> BackendResult<()>;
    fn remove(&self, key: &str) -> BackendResult<()>;

    fn remove_all(&self, keys: &[&str]) -> BackendResult<()> {
        keys.iter().try_for_each(|key| self.remove(key))
    }
}

/// SQLite-backed key-value table (`kv_entries`).
pub struct SqliteKvBackend {
    conn: Connection,
}

impl SqliteKvBackend {
    /// Opens a store file, creating and migrating it when needed.
    pub fn open(path: impl AsRef<Path>) -> BackendResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> BackendResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already-open connection after checking its schema version.
    pub fn try_from_connection(conn: Connection) -> BackendResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(&conn)?;
        if actual_version != expected_version {
            return Err(BackendError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> BackendResult<()> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}

impl KvBackend for SqliteKvBackend {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> BackendResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for key in keys {
            tx.execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// Non-durable backend for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKvBackend {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backend with raw key/value text.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: RefCell::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvBackend for MemoryKvBackend {
    fn get(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BackendResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> BackendResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
