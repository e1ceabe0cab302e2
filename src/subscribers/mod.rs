//! # Lifecycle event subscribers.
//!
//! ```text
//! Bus ──► event listener (per run) ──► SubscriberSet::emit(event)
//!                                         ├──► [queue] ──► LogWriter
//!                                         └──► [queue] ──► custom subscriber
//! ```
//!
//! The listener stops after forwarding `EventKind::Stopped`; `run` then drains every queue
//! before returning, so subscribers see the whole run.

mod subscriber;
mod subscriber_set;

#[cfg(feature = "logging")]
mod embedded;

pub use subscriber::Subscribe;
pub use subscriber_set::SubscriberSet;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
