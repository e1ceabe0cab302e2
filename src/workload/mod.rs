//! # Workload abstractions.
//!
//! - [`Workload`] - trait for the supervised business logic
//! - [`WorkloadFn`] - closure-backed implementation
//! - [`WorkloadRef`] - shared handle (`Arc<dyn Workload>`)

#[allow(clippy::module_inception)]
mod workload;
mod workload_fn;

pub use workload::{BoxWorkloadFuture, Workload};
pub use workload_fn::{WorkloadFn, WorkloadRef};
