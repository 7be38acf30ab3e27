//! PostgreSQL handle implementation

use parking_lot::Mutex;
use sqlgate_core::{Handle, Result, SqlGateError};
use std::sync::OnceLock;
use tokio_postgres::{Client, Config, NoTls};

/// Shared Tokio runtime for PostgreSQL operations.
///
/// tokio-postgres drives each connection on a background task, which needs a
/// reactor; the driver contract is blocking, so a crate-local runtime hosts
/// those tasks and `open`/`close` block on it.
fn get_postgres_runtime() -> &'static tokio::runtime::Runtime {
    static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("sqlgate-postgres-runtime")
            .build()
            .expect("Failed to create Tokio runtime for PostgreSQL driver")
    })
}

/// A live PostgreSQL connection.
///
/// Dropping the client terminates the background connection task, so `close`
/// simply takes the client out of the slot.
pub struct PostgresHandle {
    client: Mutex<Option<Client>>,
}

impl PostgresHandle {
    /// Connect to a PostgreSQL database.
    ///
    /// The DSN is a standard connection string, either key/value
    /// (`host=... user=...`) or URL form (`postgres://user@host/db`).
    pub fn open(dsn: &str) -> Result<Self> {
        // Parse before any I/O so malformed DSNs surface as InvalidParam
        let config: Config = dsn
            .parse()
            .map_err(|e| SqlGateError::InvalidParam(format!("invalid PostgreSQL DSN: {}", e)))?;

        let runtime = get_postgres_runtime();
        let client = runtime.block_on(async {
            let (client, connection) = config
                .connect(NoTls)
                .await
                .map_err(|e| SqlGateError::Driver(format!("failed to connect: {}", e)))?;

            // The connection future owns the socket; it resolves once the
            // client is dropped.
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::debug!(error = %e, "PostgreSQL connection task ended with error");
                }
            });

            Ok::<Client, SqlGateError>(client)
        })?;

        tracing::info!("PostgreSQL connection established");

        Ok(Self {
            client: Mutex::new(Some(client)),
        })
    }
}

impl Handle for PostgresHandle {
    fn driver_name(&self) -> &str {
        "postgres"
    }

    fn is_open(&self) -> bool {
        match self.client.lock().as_ref() {
            Some(client) => !client.is_closed(),
            None => false,
        }
    }

    fn close(&self) -> Result<()> {
        if let Some(client) = self.client.lock().take() {
            drop(client);
            tracing::debug!("PostgreSQL connection closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PostgresDriver;
    use sqlgate_core::Driver;

    #[test]
    fn test_driver_name() {
        assert_eq!(PostgresDriver::new().name(), "postgres");
    }

    #[test]
    fn test_malformed_dsn_is_invalid_param() {
        let result = PostgresHandle::open("this is not a dsn %%%");
        assert!(matches!(result, Err(SqlGateError::InvalidParam(_))));
    }
}
