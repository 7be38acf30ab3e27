//! PostgreSQL driver implementation

use sqlgate_core::{Driver, Handle, Result};
use std::sync::Arc;

use crate::PostgresHandle;

/// PostgreSQL database driver
pub struct PostgresDriver;

impl PostgresDriver {
    /// Create a new PostgreSQL driver instance
    pub fn new() -> Self {
        tracing::debug!("PostgreSQL driver initialized");
        Self
    }
}

impl Default for PostgresDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for PostgresDriver {
    fn name(&self) -> &str {
        "postgres"
    }

    fn open(&self, dsn: &str) -> Result<Arc<dyn Handle>> {
        let handle = PostgresHandle::open(dsn)?;
        Ok(Arc::new(handle))
    }
}
