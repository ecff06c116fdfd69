mod calculator;
mod config;
mod html;
mod memory_store;
mod platforms;
mod report;
mod resolver;
mod store;
mod types;

pub use async_trait::async_trait;
pub use calculator::*;
pub use config::*;
pub use html::*;
pub use memory_store::*;
pub use platforms::*;
pub use report::*;
pub use resolver::*;
pub use store::*;
pub use types::*;

pub type Result<T> = std::result::Result<T, Error>;
