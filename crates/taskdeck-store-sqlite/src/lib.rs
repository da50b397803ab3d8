//! SQLite-backed storage for taskdeck.

mod demo;
/// Store error type.
pub mod error;
mod raw;
mod rows;
mod tasks;
mod users;

pub use crate::error::SqliteStoreError;
pub use crate::raw::ColumnInfo;

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Result alias for store operations.
pub type Result<T, E = SqliteStoreError> = std::result::Result<T, E>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS tasks (
  id          INTEGER PRIMARY KEY AUTOINCREMENT,
  title       TEXT NOT NULL CHECK (length(title) <= 500),
  description TEXT,
  status      TEXT NOT NULL DEFAULT 'Pending',
  priority    TEXT NOT NULL DEFAULT 'Medium',
  due_date    TEXT,
  assignee    TEXT,
  category    TEXT,
  created_at  TEXT NOT NULL,
  updated_at  TEXT
);

CREATE TABLE IF NOT EXISTS users (
  id         INTEGER PRIMARY KEY AUTOINCREMENT,
  name       TEXT NOT NULL,
  email      TEXT NOT NULL UNIQUE,
  is_active  INTEGER NOT NULL DEFAULT 1,
  created_at TEXT NOT NULL
);
";

/// Handle to a database file.
///
/// The handle only remembers the path. Every operation opens its own
/// connection, so clones can be moved freely between threads and no lock is
/// held between calls. SQLite's own locking serializes concurrent writers.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating when missing) the database at `path` and install the schema.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the schema
    /// cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self { path };
        store.connect()?.execute_batch(SCHEMA)?;
        info!(path = %store.path.display(), "Opened SQLite store");
        Ok(store)
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    fn connect_read_only(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_parent_directories_and_is_idempotent() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/data/tasks.db");

        let first = SqliteStore::open(&path)?;
        assert!(path.exists());
        assert_eq!(first.path(), path.as_path());

        let second = SqliteStore::open(&path)?;
        assert_eq!(second.list_tables()?, vec!["tasks".to_owned(), "users".to_owned()]);
        Ok(())
    }
}
