//! Error types for sqlgate

use thiserror::Error;

/// Core error type for sqlgate operations
#[derive(Error, Debug)]
pub enum SqlGateError {
    /// Construction-time validation failure (empty DSN, zero attempt budget)
    /// or a malformed DSN rejected by a driver before any I/O.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A handle was requested before any successful connect.
    #[error("not connected")]
    NotConnected,

    /// Every attempt of a connect cycle failed.
    #[error("failed to connect after {attempts} attempt(s)")]
    FailedToConnect { attempts: u32 },

    /// Failure reported by the underlying driver or transport.
    #[error("driver error: {0}")]
    Driver(String),

    /// No driver with the given name is registered.
    #[error("unknown driver: {0}")]
    UnknownDriver(String),
}

/// Result type alias for sqlgate operations
pub type Result<T> = std::result::Result<T, SqlGateError>;
