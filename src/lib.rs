//! # appctl
//!
//! **appctl** is an application lifecycle controller for long-running tokio processes.
//!
//! It runs one workload, optionally next to a service supervisor, and guarantees that the
//! process shuts down exactly once, whichever of several concurrent triggers fires first:
//! the workload returning, the workload failing or panicking, the service supervisor failing,
//! or an OS termination signal. The controller is itself a cancellation [`Context`], so the
//! workload can wait on it without knowing its concrete type.
//!
//! ## Architecture
//! ```text
//!                 ┌───────────────────────────────────────────┐
//!                 │ Application                               │
//!                 │  - StateCell  Init→Running→HoldOn→Shutdown│
//!                 │  - hold_on: Latch      done: Latch        │
//!                 │  - error slot (first writer wins)         │
//!                 └──┬──────────────┬──────────────┬──────────┘
//!                    ▼              ▼              ▼
//!              ┌──────────┐  ┌─────────────┐  ┌──────────────┐
//!              │ run_main │  │watch_signals│  │watch_services│
//!              │ (panic   │  │ hold_on ─►  │  │ (optional)   │
//!              │ boundary)│  │ grace ─►    │  │              │
//!              │          │  │ shutdown    │  │              │
//!              └────┬─────┘  └──────┬──────┘  └──────┬───────┘
//!                   └───────────────┼────────────────┘
//!                                   ▼
//!                       Bus (lifecycle events) ──► SubscriberSet ──► LogWriter / custom
//! ```
//!
//! ### States
//! ```text
//! Init ──run()──► Running ──hold_on()──► HoldOn ──shutdown()──► Shutdown
//!                    │  workload exit / error / panic, watch exit, signal
//!                    └──────────────────────► (hold_on, then shutdown)
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                      |
//! |-------------------|-------------------------------------------------------------|-----------------------------------------|
//! | **Lifecycle**     | Single-use run with ordered, at-most-once shutdown          | [`Application`], [`AppState`]           |
//! | **Context**       | Deadline, done latch, error, keyed lookup                   | [`Context`], [`WithTimeout`], [`Latch`] |
//! | **Workload**      | Supervised business logic                                   | [`Workload`], [`WorkloadFn`]            |
//! | **Services**      | External supervisor with bounded init and watched run       | [`Services`]                            |
//! | **Signals**       | SIGHUP/SIGINT/SIGTERM/SIGQUIT with grace-period escalation  | [`SignalSource`], [`OsSignals`]         |
//! | **Events**        | Lifecycle events and subscribers                            | [`Event`], [`Subscribe`]                |
//! | **Errors**        | Typed errors for runs and contexts                          | [`AppError`], [`ContextError`]          |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], which forwards lifecycle events to `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use appctl::{AppConfig, Application, BoxError, Context, Latch};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = AppConfig {
//!         termination_timeout: Duration::from_secs(5),
//!         ..AppConfig::default()
//!     };
//!
//!     let app = Application::builder(cfg)
//!         .with_main_fn(|ctx: Arc<dyn Context>, hold_on: Latch| async move {
//!             // Stop taking new work on hold-on; finish what is in flight before `done`.
//!             tokio::select! {
//!                 _ = hold_on.closed() => {}
//!                 _ = ctx.done().closed() => {}
//!                 _ = tokio::time::sleep(Duration::from_millis(10)) => {}
//!             }
//!             Ok::<_, BoxError>(())
//!         })
//!         .build();
//!
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

mod context;
mod core;
mod error;
mod events;
mod subscribers;
mod workload;

// ---- Public re-exports ----

pub use context::{AppContextKey, Context, WithTimeout};
pub use crate::core::{
    AppConfig, AppState, Application, ApplicationBuilder, Latch, OsSignals, Services,
    SignalSource, TermSignal,
};
pub use error::{AppError, BoxError, ContextError};
pub use events::{Bus, Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};
pub use workload::{BoxWorkloadFuture, Workload, WorkloadFn, WorkloadRef};

#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
