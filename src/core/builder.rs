use std::future::Future;
use std::sync::Arc;

use crate::context::Context;
use crate::core::application::Application;
use crate::core::config::AppConfig;
use crate::core::latch::Latch;
use crate::core::services::Services;
use crate::core::shutdown::{OsSignals, SignalSource};
use crate::error::BoxError;
use crate::subscribers::Subscribe;
use crate::workload::{WorkloadFn, WorkloadRef};

/// Builder for constructing an [`Application`].
pub struct ApplicationBuilder {
    cfg: AppConfig,
    main: Option<WorkloadRef>,
    services: Option<Arc<dyn Services>>,
    signals: Arc<dyn SignalSource>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ApplicationBuilder {
    /// Creates a new builder with the given configuration and OS signal handling.
    pub fn new(cfg: AppConfig) -> Self {
        Self {
            cfg,
            main: None,
            services: None,
            signals: Arc::new(OsSignals),
            subscribers: Vec::new(),
        }
    }

    /// Sets the workload. Required: `run` fails with `MainOmitted` without one.
    pub fn with_main(mut self, main: WorkloadRef) -> Self {
        self.main = Some(main);
        self
    }

    /// Sets the workload from a closure.
    pub fn with_main_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn(Arc<dyn Context>, Latch) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.with_main(WorkloadFn::arc(f))
    }

    /// Sets the service supervisor.
    pub fn with_services(mut self, services: Arc<dyn Services>) -> Self {
        self.services = Some(services);
        self
    }

    /// Replaces the signal source (default: [`OsSignals`]).
    pub fn with_signals(mut self, signals: impl SignalSource) -> Self {
        self.signals = Arc::new(signals);
        self
    }

    /// Sets lifecycle event subscribers.
    ///
    /// Subscribers receive events through dedicated workers with bounded queues; `run` waits
    /// for them to drain before returning.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the application. No tasks are started until `run`.
    pub fn build(self) -> Arc<Application> {
        Arc::new(Application::new_internal(
            self.cfg,
            self.main,
            self.services,
            self.signals,
            self.subscribers,
        ))
    }
}
