//! Key-value storage
//!
//! All state lives in a single SQLite `ItemTable(key, value)` table where each
//! value is a JSON document. One key holds one whole collection; writes replace
//! the previous value (last write wins).

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::error::{Error, Result};

/// Keys of the collections kept in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Users,
    Pets,
    Adoptions,
    Favorites,
    Notifications,
    DarkMode,
    CurrentUser,
}

impl Key {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Pets => "pets",
            Self::Adoptions => "adoptions",
            Self::Favorites => "favorites",
            Self::Notifications => "notifications",
            Self::DarkMode => "darkMode",
            Self::CurrentUser => "currentUser",
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to the key-value database
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if needed) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        debug!(path = %path.display(), "opening store");
        Self::init(Connection::open(path)?)
    }

    /// Open a throwaway store in memory
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS ItemTable (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )",
        )?;
        Ok(Self { conn })
    }

    /// Read the raw JSON text stored under `key`
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM ItemTable WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Replace the raw text stored under `key`
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Decode the value under `key`, `None` when absent
    pub fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>> {
        let Some(raw) = self.get_raw(key.as_str())? else {
            debug!(%key, "key not present");
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| Error::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Decode a collection, treating a missing key as empty
    pub fn get_list<T: DeserializeOwned>(&self, key: Key) -> Result<Vec<T>> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    /// Encode and store `value` under `key`
    pub fn set<T: Serialize + ?Sized>(&self, key: Key, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|source| Error::Encode {
            key: key.to_string(),
            source,
        })?;
        debug!(%key, bytes = raw.len(), "writing key");
        self.set_raw(key.as_str(), &raw)
    }

    /// Delete `key`; returns whether it existed
    pub fn remove(&self, key: Key) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM ItemTable WHERE key = ?1", [key.as_str()])?;
        Ok(removed > 0)
    }

    /// All keys currently stored, sorted
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM ItemTable ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Run `f` inside one transaction; every write is rolled back if it fails
    pub fn transaction<T>(&self, f: impl FnOnce(&Store) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let out = f(self)?;
        tx.commit()?;
        Ok(out)
    }
}
