//! Convenience constructors for building connectors by driver name

use sqlgate_connector::{DbConnector, RetryPolicy};
use sqlgate_core::{Driver, Result, SqlGateError};
use std::sync::Arc;

use crate::instrument::register_traced;
use crate::registry::global_registry;

/// Which flavor of a driver a connector should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverVariant {
    /// The driver as registered.
    #[default]
    Plain,
    /// The tracing-instrumented wrapper; registered on first use, once per
    /// process.
    Traced,
}

/// Build a connector for a registered driver with the default retry policy's
/// backoff schedule and the given attempt budget.
pub fn connector(driver_name: &str, dsn: &str, max_attempts: u32) -> Result<DbConnector> {
    connector_with(DriverVariant::Plain, driver_name, dsn, max_attempts)
}

/// Build a connector for a registered driver, selecting the driver variant.
///
/// `DriverVariant::Traced` resolves the base driver, registers its traced
/// wrapper in the process-wide registry (idempotently) and connects through
/// the wrapper.
pub fn connector_with(
    variant: DriverVariant,
    driver_name: &str,
    dsn: &str,
    max_attempts: u32,
) -> Result<DbConnector> {
    let driver = resolve(variant, driver_name)?;
    DbConnector::new(driver, dsn, max_attempts)
}

/// Build a connector with an explicit retry policy.
pub fn connector_with_policy(
    variant: DriverVariant,
    driver_name: &str,
    dsn: &str,
    policy: RetryPolicy,
) -> Result<DbConnector> {
    let driver = resolve(variant, driver_name)?;
    DbConnector::with_policy(driver, dsn, policy)
}

fn resolve(variant: DriverVariant, driver_name: &str) -> Result<Arc<dyn Driver>> {
    let base = global_registry()
        .read()
        .get(driver_name)
        .ok_or_else(|| SqlGateError::UnknownDriver(driver_name.to_string()))?;

    Ok(match variant {
        DriverVariant::Plain => base,
        DriverVariant::Traced => register_traced(base),
    })
}
