//! sqlgate drivers - database driver implementations and wiring
//!
//! This crate provides concrete implementations of the driver traits defined
//! in `sqlgate-core`, a registry to look them up by name, an instrumented
//! driver wrapper, and convenience constructors that turn a driver name and
//! a data source name into a ready-to-use connector.

#[cfg(feature = "mysql")]
pub use sqlgate_driver_mysql as mysql;
#[cfg(feature = "postgres")]
pub use sqlgate_driver_postgres as postgres;
#[cfg(feature = "sqlite")]
pub use sqlgate_driver_sqlite as sqlite;

mod connect;
mod instrument;
mod registry;

pub use connect::{DriverVariant, connector, connector_with, connector_with_policy};
pub use instrument::{TracedDriver, register_traced};
pub use registry::{DriverRegistry, global_registry};

/// Re-export commonly used types from the core and connector crates
pub use sqlgate_connector::{Connector, DbConnector, ExponentialBackoff, RetryPolicy};
pub use sqlgate_core::{Driver, Handle, Result, SqlGateError};

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_connector_end_to_end() {
        let connector = connector("sqlite", ":memory:", 3).expect("connector construction");

        assert_eq!(connector.data_source_name(), ":memory:");
        assert_eq!(connector.driver_name(), "sqlite");

        connector.connect().expect("connect to in-memory db");
        let handle = connector.handle().expect("handle after connect");
        assert!(handle.is_open());

        connector.close();
        assert!(!handle.is_open());
        assert!(matches!(
            connector.handle(),
            Err(SqlGateError::NotConnected)
        ));
    }

    #[test]
    fn test_unknown_driver_name() {
        let result = connector("no-such-driver", "dsn", 1);
        assert!(matches!(result, Err(SqlGateError::UnknownDriver(_))));
    }
}
