//! SQLite driver implementation

use sqlgate_core::{Driver, Handle, Result};
use std::sync::Arc;

use crate::SqliteHandle;

/// SQLite database driver
pub struct SqliteDriver;

impl SqliteDriver {
    /// Create a new SQLite driver instance
    pub fn new() -> Self {
        tracing::debug!("SQLite driver initialized");
        Self
    }
}

impl Default for SqliteDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for SqliteDriver {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn open(&self, dsn: &str) -> Result<Arc<dyn Handle>> {
        let handle = SqliteHandle::open(dsn)?;
        Ok(Arc::new(handle))
    }
}
