//! Lifecycle events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Application` state transitions, the main runner, the signal watcher,
//!   the service hook, and `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the per-run event listener (fans out to `SubscriberSet`) and any receiver
//!   obtained from [`Application::events`](crate::Application::events).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
