//! # Built-in subscribers
//!
//! - [`LogWriter`]: forwards lifecycle events to `tracing`.

mod log;

pub use log::LogWriter;
