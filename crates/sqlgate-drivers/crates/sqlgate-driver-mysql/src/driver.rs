//! MySQL driver implementation

use sqlgate_core::{Driver, Handle, Result};
use std::sync::Arc;

use crate::MySqlHandle;

/// MySQL database driver
pub struct MySqlDriver;

impl MySqlDriver {
    /// Create a new MySQL driver instance
    pub fn new() -> Self {
        tracing::debug!("MySQL driver initialized");
        Self
    }
}

impl Default for MySqlDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for MySqlDriver {
    fn name(&self) -> &str {
        "mysql"
    }

    fn open(&self, dsn: &str) -> Result<Arc<dyn Handle>> {
        let handle = MySqlHandle::open(dsn)?;
        Ok(Arc::new(handle))
    }
}
