//! # Workload abstraction.
//!
//! A [`Workload`] is the business logic an [`Application`](crate::Application) supervises. It
//! receives the application as a [`Context`] and the hold-on [`Latch`] as a separate signal, so
//! it can stop taking new work on hold-on and still finish in-flight work before `done`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::context::Context;
use crate::core::Latch;
use crate::error::BoxError;

/// Boxed future returned by [`Workload::spawn`].
pub type BoxWorkloadFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'static>>;

/// # Long-running unit of work.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use appctl::{BoxWorkloadFuture, Context, Latch, Workload};
///
/// struct Server;
///
/// impl Workload for Server {
///     fn spawn(&self, ctx: Arc<dyn Context>, hold_on: Latch) -> BoxWorkloadFuture {
///         Box::pin(async move {
///             tokio::select! {
///                 _ = hold_on.closed() => {}  // stop accepting connections
///                 _ = ctx.done().closed() => {}
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Workload: Send + Sync + 'static {
    /// Creates the future that runs the workload.
    ///
    /// Called once per [`Application::run`](crate::Application::run). A panic here or inside
    /// the future is caught and reported as [`AppError::Panicked`](crate::AppError::Panicked).
    fn spawn(&self, ctx: Arc<dyn Context>, hold_on: Latch) -> BoxWorkloadFuture;
}
