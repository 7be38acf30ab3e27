//! sqlgate core - foundational traits and error taxonomy
//!
//! This crate defines the contract between the connector lifecycle layer and
//! the concrete database backends:
//!
//! - `Driver` - the open primitive a backend must expose
//! - `Handle` - a live connection resource owned by a connector
//! - `SqlGateError` - the error taxonomy shared by every sqlgate crate

mod driver;
mod error;

pub use driver::*;
pub use error::*;
