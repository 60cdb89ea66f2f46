//! SQLite-backed blob store.
//!
//! A single key/value table keyed by the engine's namespaced strings.
//! The database lives at `~/.config/wellspring/wellspring.db`.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{CoreError, StorageError};

use super::{data_dir, StorageAdapter};

/// SQLite database holding every persisted blob.
pub struct SqliteAdapter {
    conn: Connection,
}

impl SqliteAdapter {
    /// Open the database at `~/.config/wellspring/wellspring.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("wellspring.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let adapter = Self { conn };
        adapter.migrate()?;
        Ok(adapter)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value BLOB NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl StorageAdapter for SqliteAdapter {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let adapter = SqliteAdapter::open_at(&path).unwrap();
        adapter.save("pool:ink", b"{\"level\":42}").unwrap();
        drop(adapter);

        // Reopen: the blob survives the connection.
        let reopened = SqliteAdapter::open_at(&path).unwrap();
        assert_eq!(
            reopened.load("pool:ink").unwrap(),
            Some(b"{\"level\":42}".to_vec())
        );
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = SqliteAdapter::open_at(&dir.path().join("test.db")).unwrap();
        adapter.save("k", b"one").unwrap();
        adapter.save("k", b"two").unwrap();
        assert_eq!(adapter.load("k").unwrap(), Some(b"two".to_vec()));
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = SqliteAdapter::open_at(&dir.path().join("test.db")).unwrap();
        assert_eq!(adapter.load("absent").unwrap(), None);
    }
}
