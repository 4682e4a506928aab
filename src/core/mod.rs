//! Crate-wide configuration, error types, and halt-and-prompt control flow.

pub mod config;
pub mod error;
pub mod step;

pub use config::Config;
pub use error::{Error, Result};
pub(crate) use step::proceed;
pub use step::{Prompt, Step};
