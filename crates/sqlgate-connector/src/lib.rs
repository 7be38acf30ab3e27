//! sqlgate connector - connection lifecycle management
//!
//! This crate implements the lifecycle core: a connector starts disconnected,
//! `connect()` runs a bounded retry loop with exponential backoff, a success
//! transitions it to connected, and `close()` returns it to disconnected.
//! All of it is safe under concurrent callers.
//!
//! # Example
//!
//! ```ignore
//! use sqlgate_connector::{Connector, DbConnector};
//!
//! let connector = DbConnector::new(driver, "postgres://localhost/app", 3)?;
//! connector.connect()?;
//! let handle = connector.handle()?;
//! connector.close();
//! ```

mod backoff;
mod connector;


pub use backoff::ExponentialBackoff;
pub use connector::{Connector, DbConnector, RetryPolicy};
