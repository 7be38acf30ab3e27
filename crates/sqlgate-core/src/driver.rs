//! Driver and handle traits

use crate::Result;
use std::sync::Arc;

/// A live database connection resource.
///
/// Handles are created by [`Driver::open`] and owned by the connector that
/// requested them. Callers that observe a handle hold a shared reference into
/// connector-owned state; after the connector closes, the handle reports
/// `is_open() == false`.
pub trait Handle: Send + Sync {
    /// Name of the driver that produced this handle.
    fn driver_name(&self) -> &str;

    /// Whether the underlying resource is still live.
    fn is_open(&self) -> bool;

    /// Release the underlying resource.
    ///
    /// Safe to call from any thread and idempotent; closing an already
    /// closed handle is a no-op.
    fn close(&self) -> Result<()>;
}

/// The open primitive a database backend must expose.
///
/// A driver is stateless connection-wise: it knows how to turn a data source
/// name into a live [`Handle`], synchronously and blocking. Retry, locking
/// and lifecycle belong to the connector layer, never to the driver.
pub trait Driver: Send + Sync {
    /// Unique driver identity (e.g. "sqlite", "postgres", "mysql").
    fn name(&self) -> &str;

    /// Open a new connection to `dsn`.
    ///
    /// Blocks until the connection is established or the attempt fails.
    /// A DSN the driver cannot even parse is reported as
    /// [`SqlGateError::InvalidParam`](crate::SqlGateError::InvalidParam);
    /// transport-level failures as
    /// [`SqlGateError::Driver`](crate::SqlGateError::Driver).
    fn open(&self, dsn: &str) -> Result<Arc<dyn Handle>>;
}
