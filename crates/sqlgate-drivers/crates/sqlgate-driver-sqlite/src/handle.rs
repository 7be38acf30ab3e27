//! SQLite handle implementation

use parking_lot::Mutex;
use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use sqlgate_core::{Handle, Result, SqlGateError};

/// A live SQLite connection.
///
/// The rusqlite connection is `Send` but not `Sync`, so it sits behind a
/// mutex; `close` takes it out and finalizes it.
pub struct SqliteHandle {
    conn: Mutex<Option<RusqliteConnection>>,
}

impl SqliteHandle {
    /// Open a SQLite database.
    ///
    /// Accepts `:memory:`, a plain file path, or a `sqlite://`-prefixed path.
    pub fn open(dsn: &str) -> Result<Self> {
        if dsn.is_empty() {
            return Err(SqlGateError::InvalidParam(
                "SQLite DSN must not be empty".into(),
            ));
        }
        let path = dsn.strip_prefix("sqlite://").unwrap_or(dsn);

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = if path == ":memory:" {
            RusqliteConnection::open_in_memory().map_err(|e| {
                SqlGateError::Driver(format!("failed to open in-memory database: {}", e))
            })?
        } else {
            RusqliteConnection::open_with_flags(path, flags).map_err(|e| {
                SqlGateError::Driver(format!(
                    "failed to open SQLite database at '{}': {}",
                    path, e
                ))
            })?
        };

        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| SqlGateError::Driver(format!("failed to enable foreign keys: {}", e)))?;

        tracing::info!(path = %path, "SQLite connection established");

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }
}

impl Handle for SqliteHandle {
    fn driver_name(&self) -> &str {
        "sqlite"
    }

    fn is_open(&self) -> bool {
        self.conn.lock().is_some()
    }

    fn close(&self) -> Result<()> {
        let conn = self.conn.lock().take();
        if let Some(conn) = conn {
            conn.close()
                .map_err(|(_, e)| SqlGateError::Driver(format!("failed to close SQLite: {}", e)))?;
            tracing::debug!("SQLite connection closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteDriver;
    use sqlgate_core::Driver;

    #[test]
    fn test_open_in_memory() {
        let handle = SqliteHandle::open(":memory:").expect("in-memory open");
        assert!(handle.is_open());
        handle.close().expect("close");
        assert!(!handle.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let handle = SqliteHandle::open(":memory:").unwrap();
        handle.close().unwrap();
        handle.close().unwrap();
    }

    #[test]
    fn test_open_file_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("test.db");
        let dsn = path.to_string_lossy().to_string();

        let driver = SqliteDriver::new();
        let handle = driver.open(&dsn).expect("file open");
        assert_eq!(handle.driver_name(), "sqlite");
        assert!(path.exists());
        handle.close().unwrap();
    }

    #[test]
    fn test_open_with_scheme_prefix() {
        let handle = SqliteHandle::open("sqlite://:memory:").expect("prefixed open");
        assert!(handle.is_open());
        handle.close().unwrap();
    }

    #[test]
    fn test_open_missing_parent_directory_fails() {
        let result = SqliteHandle::open("/nonexistent-dir-sqlgate/test.db");
        assert!(result.is_err());
    }
}
