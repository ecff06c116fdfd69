mod handler;
mod server;

pub use handler::*;
pub use server::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
