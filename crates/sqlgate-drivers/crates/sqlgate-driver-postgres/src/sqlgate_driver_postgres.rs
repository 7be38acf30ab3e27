//! PostgreSQL driver for sqlgate

mod driver;
mod handle;

pub use driver::PostgresDriver;
pub use handle::PostgresHandle;
