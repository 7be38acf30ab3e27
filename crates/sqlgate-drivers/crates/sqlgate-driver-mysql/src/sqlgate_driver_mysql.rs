//! MySQL driver for sqlgate

mod driver;
mod handle;

pub use driver::MySqlDriver;
pub use handle::MySqlHandle;
