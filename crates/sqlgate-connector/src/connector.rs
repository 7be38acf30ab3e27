//! Connector state machine with bounded retry
//!
//! One `DbConnector` manages one logical connection handle. Every backend
//! goes through this single state machine, parameterized by the driver's
//! open primitive; backends never duplicate the retry or locking logic.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::RwLock;
use sqlgate_core::{Driver, Handle, Result, SqlGateError};

use crate::ExponentialBackoff;

/// Retry configuration for a connector: attempt budget plus backoff schedule.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: ExponentialBackoff,
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget and backoff schedule.
    pub fn new(max_attempts: u32, backoff: ExponentialBackoff) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Get the maximum number of attempts per connect cycle.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Get the backoff schedule.
    pub fn backoff(&self) -> &ExponentialBackoff {
        &self.backoff
    }
}

impl Default for RetryPolicy {
    /// Default policy: 3 attempts, 100ms/30s exponential backoff.
    fn default() -> Self {
        Self::new(3, ExponentialBackoff::default())
    }
}

/// Capability set every connector exposes to application code.
///
/// Application code should depend on this trait rather than on a concrete
/// backend; `DbConnector` is the one implementation, parameterized by the
/// driver.
pub trait Connector: Send + Sync {
    /// The data source name this connector was constructed with.
    fn data_source_name(&self) -> &str;

    /// Identity of the underlying driver.
    fn driver_name(&self) -> &str;

    /// The live handle, or `NotConnected` while disconnected.
    fn handle(&self) -> Result<Arc<dyn Handle>>;

    /// Establish the connection, retrying per the connector's policy.
    fn connect(&self) -> Result<()>;

    /// Tear the connection down. Never fails; idempotent.
    fn close(&self);
}

/// Mutable connector state, guarded by one RwLock.
///
/// The backoff cursor lives here so it is only ever touched inside
/// `connect`'s critical section.
struct ConnState {
    handle: Option<Arc<dyn Handle>>,
    backoff: ExponentialBackoff,
}

/// A connector wrapping a driver-specific connection.
///
/// Starts disconnected; `connect()` runs up to `max_attempts` open attempts
/// with exponential backoff and transitions to connected on the first
/// success. `close()` returns it to disconnected. The connector is reusable
/// indefinitely across connect/close cycles.
pub struct DbConnector {
    dsn: String,
    driver: Arc<dyn Driver>,
    max_attempts: u32,
    state: RwLock<ConnState>,
}

impl DbConnector {
    /// Create a connector with the default backoff schedule.
    ///
    /// Fails with `InvalidParam` when `dsn` is empty or `max_attempts` is
    /// zero. No connection attempt is made; the connector starts
    /// disconnected.
    pub fn new(driver: Arc<dyn Driver>, dsn: impl Into<String>, max_attempts: u32) -> Result<Self> {
        let backoff = ExponentialBackoff::default();
        Self::with_policy(driver, dsn, RetryPolicy::new(max_attempts, backoff))
    }

    /// Create a connector with an explicit retry policy.
    pub fn with_policy(
        driver: Arc<dyn Driver>,
        dsn: impl Into<String>,
        policy: RetryPolicy,
    ) -> Result<Self> {
        let dsn = dsn.into();
        if dsn.is_empty() {
            return Err(SqlGateError::InvalidParam(
                "data source name must not be empty".into(),
            ));
        }
        if policy.max_attempts == 0 {
            return Err(SqlGateError::InvalidParam(
                "max_attempts must be at least 1".into(),
            ));
        }

        tracing::debug!(
            driver = %driver.name(),
            max_attempts = policy.max_attempts,
            "connector created"
        );

        Ok(Self {
            dsn,
            driver,
            max_attempts: policy.max_attempts,
            state: RwLock::new(ConnState {
                handle: None,
                backoff: policy.backoff,
            }),
        })
    }

    /// Run the retry loop. Caller holds the write lock.
    fn run_attempts(&self, state: &mut ConnState) -> Result<Arc<dyn Handle>> {
        for attempt in 1..=self.max_attempts {
            // The delay applies before every attempt, including the first,
            // so a fleet of connectors created together never stampedes the
            // target with simultaneous first attempts.
            thread::sleep(state.backoff.next_delay());

            match self.driver.open(&self.dsn) {
                Ok(handle) => {
                    tracing::info!(
                        driver = %self.driver.name(),
                        attempt,
                        "connection established"
                    );
                    return Ok(handle);
                }
                Err(err) => {
                    tracing::debug!(
                        driver = %self.driver.name(),
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "connect attempt failed"
                    );
                }
            }
        }

        tracing::warn!(
            driver = %self.driver.name(),
            attempts = self.max_attempts,
            "all connect attempts exhausted"
        );
        Err(SqlGateError::FailedToConnect {
            attempts: self.max_attempts,
        })
    }

    /// Next scheduled delay without advancing the generator. Test hook and
    /// observability aid.
    pub fn next_backoff_delay(&self) -> Duration {
        let state = self.state.read();
        state.backoff.delay_for_attempt(state.backoff.attempt())
    }
}

impl Connector for DbConnector {
    fn data_source_name(&self) -> &str {
        &self.dsn
    }

    fn driver_name(&self) -> &str {
        self.driver.name()
    }

    fn handle(&self) -> Result<Arc<dyn Handle>> {
        let state = self.state.read();
        state.handle.clone().ok_or(SqlGateError::NotConnected)
    }

    /// Establish the connection.
    ///
    /// Holds the write lock for the entire retry loop, so a concurrent
    /// `close` or `handle` call blocks until the in-flight connect resolves
    /// (success or exhaustion); an in-flight connect cannot be interrupted.
    /// Already connected is a successful no-op. The backoff schedule rewinds
    /// after every cycle regardless of outcome, so a later `connect` starts
    /// from the initial interval again.
    fn connect(&self) -> Result<()> {
        let mut state = self.state.write();

        if state.handle.is_some() {
            return Ok(());
        }

        let outcome = self.run_attempts(&mut state);
        state.backoff.reset();

        state.handle = Some(outcome?);
        Ok(())
    }

    fn close(&self) {
        let mut state = self.state.write();
        if let Some(handle) = state.handle.take() {
            // Close errors are swallowed to keep teardown infallible and
            // idempotent; they are still visible in the logs.
            if let Err(err) = handle.close() {
                tracing::warn!(
                    driver = %self.driver.name(),
                    error = %err,
                    "error while closing connection"
                );
            }
        }
    }
}
