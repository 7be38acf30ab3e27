//! SQLite driver for sqlgate

mod driver;
mod handle;

pub use driver::SqliteDriver;
pub use handle::SqliteHandle;
