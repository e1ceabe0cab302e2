//! # Cancellation context capability.
//!
//! [`Context`] is what running work depends on to learn that it should stop. The
//! [`Application`](crate::Application) implements it, so a workload can hold an
//! `Arc<dyn Context>` without knowing the controller type.
//!
//! ## Operations
//! | Operation    | Application                                   | [`WithTimeout`]                     |
//! |--------------|-----------------------------------------------|-------------------------------------|
//! | `deadline()` | always `None`                                 | own deadline (or parent's, earlier) |
//! | `done()`     | latch closed at final shutdown                | closes at deadline or with parent   |
//! | `err()`      | `Some(Shutdown)` once shut down, else `None`  | `DeadlineExceeded` or parent's err  |
//! | `value(key)` | itself for [`AppContextKey`], else `None`     | delegates to parent                 |
//!
//! ## Recovering the controller
//! ```rust
//! use appctl::{Application, Context};
//!
//! fn controller_of(ctx: &dyn Context) -> Option<&Application> {
//!     Application::from_context(ctx)
//! }
//! ```

mod timeout;

use std::any::Any;
use std::time::Instant;

use crate::core::Latch;
use crate::error::ContextError;

pub use timeout::WithTimeout;

/// Key under which an [`Application`](crate::Application) returns itself from
/// [`Context::value`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AppContextKey;

/// Cancellation context: deadline, done latch, error, and keyed value lookup.
pub trait Context: Send + Sync + 'static {
    /// Returns the time after which work on behalf of this context should stop, if any.
    fn deadline(&self) -> Option<Instant>;

    /// Returns a latch closed when work on behalf of this context should stop.
    fn done(&self) -> Latch;

    /// Returns why the context is finished; `None` while `done` is still open.
    fn err(&self) -> Option<ContextError>;

    /// Looks up a value associated with `key`.
    fn value(&self, key: &dyn Any) -> Option<&(dyn Any + Send + Sync)>;
}
