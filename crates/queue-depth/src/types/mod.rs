mod error;
mod id;
mod job;
mod platform;
mod records;
mod severity;

pub use error::*;
pub use id::*;
pub use job::*;
pub use platform::*;
pub use records::*;
pub use severity::*;
