//! Error types used by the application controller and its context.
//!
//! This module defines two error enums:
//!
//! - [`AppError`] — errors returned by [`Application::run`](crate::Application::run).
//! - [`ContextError`] — the reason a [`Context`](crate::Context) reports itself as finished.
//!
//! Both provide `as_label` for logs/metrics.

use std::time::Duration;
use thiserror::Error;

use crate::core::AppState;

/// Error type returned by workloads and service supervisors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by the application controller.
///
/// Configuration and state-usage errors (`MainOmitted`, `WrongState`) are returned before any
/// side effect. Initialization errors abort the run. Runtime errors (`Main`, `Panicked`,
/// `Watch`) are recorded at most once: the first one to win the `Running → HoldOn` transition.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AppError {
    /// `run` was called without a workload.
    #[error("main function is omitted")]
    MainOmitted,

    /// `run` was called on an application that is not in the `Init` state.
    #[error("wrong application state: {state:?}")]
    WrongState {
        /// State observed when the call was rejected.
        state: AppState,
    },

    /// Service supervisor initialization returned an error.
    #[error("services init failed: {0}")]
    Init(#[source] BoxError),

    /// Service supervisor initialization did not finish in time.
    #[error("services init timed out after {timeout:?}")]
    InitTimeout {
        /// The configured initialization timeout.
        timeout: Duration,
    },

    /// Registering interest in OS signals failed.
    #[error("signal registration failed: {0}")]
    Signal(#[from] std::io::Error),

    /// The workload returned an error.
    #[error(transparent)]
    Main(BoxError),

    /// The workload panicked.
    #[error("unhandled panic: {message}")]
    Panicked {
        /// Panic payload rendered as text.
        message: String,
    },

    /// The service supervisor watch loop returned an error.
    #[error("services watch failed: {0}")]
    Watch(#[source] BoxError),
}

impl AppError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use appctl::AppError;
    ///
    /// assert_eq!(AppError::MainOmitted.as_label(), "app_main_omitted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AppError::MainOmitted => "app_main_omitted",
            AppError::WrongState { .. } => "app_wrong_state",
            AppError::Init(_) => "app_init_failed",
            AppError::InitTimeout { .. } => "app_init_timeout",
            AppError::Signal(_) => "app_signal_failed",
            AppError::Main(_) => "app_main_failed",
            AppError::Panicked { .. } => "app_main_panicked",
            AppError::Watch(_) => "app_watch_failed",
        }
    }

    /// Returns the workload error if this is [`AppError::Main`].
    pub fn as_main(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            AppError::Main(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

/// # Reason a context is finished.
///
/// Returned by [`Context::err`](crate::Context::err) once the context's done latch is closed.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The application has shut down.
    #[error("application is shut down")]
    Shutdown,

    /// A derived context passed its deadline.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl ContextError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ContextError::Shutdown => "ctx_shutdown",
            ContextError::DeadlineExceeded => "ctx_deadline_exceeded",
        }
    }
}
