//! Controller core: state machine, orchestration, and termination.
//!
//! The public API from this module is [`Application`] and the types it is configured with.
//!
//! Internal modules:
//! - [`state`]: atomic state cell with compare-and-swap transitions;
//! - [`latch`]: one-shot broadcast latches (`hold_on`, `done`);
//! - [`application`]: `run` orchestration, `hold_on`/`shutdown`, error recording;
//! - [`runner`]: runs the workload behind a panic boundary;
//! - [`shutdown`]: OS signal handling and forced-shutdown escalation;
//! - [`services`]: service supervisor init/watch hook.

mod application;
mod builder;
mod config;
mod latch;
mod runner;
mod services;
mod shutdown;
mod state;

pub use application::Application;
pub use builder::ApplicationBuilder;
pub use config::AppConfig;
pub use latch::Latch;
pub use services::Services;
pub use shutdown::{OsSignals, SignalSource, TermSignal};
pub use state::AppState;

pub(crate) use runner::panic_message;
