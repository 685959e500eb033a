pub mod error;
pub mod report;
pub mod target;

pub use error::{Error, Result};
