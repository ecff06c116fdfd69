mod error;
mod schema;
mod sql_store;

pub use error::*;
pub use schema::*;
pub use sql_store::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
