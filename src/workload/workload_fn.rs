//! # Function-backed workload (`WorkloadFn`)
//!
//! [`WorkloadFn`] wraps a closure `F: Fn(Arc<dyn Context>, Latch) -> Fut`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use appctl::{BoxError, Context, Latch, WorkloadFn, WorkloadRef};
//!
//! let w: WorkloadRef = WorkloadFn::arc(|ctx: Arc<dyn Context>, _hold_on: Latch| async move {
//!     ctx.done().closed().await;
//!     Ok::<_, BoxError>(())
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use crate::context::Context;
use crate::core::Latch;
use crate::error::BoxError;
use crate::workload::workload::{BoxWorkloadFuture, Workload};

/// Shared handle to a workload.
pub type WorkloadRef = Arc<dyn Workload>;

/// Function-backed workload implementation.
#[derive(Debug)]
pub struct WorkloadFn<F> {
    f: F,
}

impl<F> WorkloadFn<F> {
    /// Creates a new function-backed workload.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the workload and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<F, Fut> Workload for WorkloadFn<F>
where
    F: Fn(Arc<dyn Context>, Latch) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    fn spawn(&self, ctx: Arc<dyn Context>, hold_on: Latch) -> BoxWorkloadFuture {
        Box::pin((self.f)(ctx, hold_on))
    }
}
