#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod options;
pub mod time;

pub use error::ValidationError;
pub use time::{Clock, format_elapsed};
