//! # Service supervisor hook.
//!
//! An [`Application`](crate::Application) can delegate auxiliary background services to an
//! external supervisor through the [`Services`] trait:
//!
//! ```text
//! run()
//!   ├─► init_services(ctx = WithTimeout(app, initialization_timeout))
//!   │     ├─ Ok              ─► publish ServicesReady, continue startup
//!   │     ├─ Err(e)          ─► AppError::Init(e), abort
//!   │     └─ timeout elapsed ─► AppError::InitTimeout, abort
//!   └─► spawn watch_services(app)
//!         ├─ Ok      ─► publish WatchStopped ─► shutdown()
//!         ├─ Err(e)  ─► publish WatchFailed ─► record AppError::Watch(e) ─► shutdown()
//!         └─ panic   ─► publish WatchFailed ─► record AppError::Watch("watch panicked: ..") ─► shutdown()
//! ```

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;

use crate::context::{Context, WithTimeout};
use crate::core::application::Application;
use crate::core::runner::panic_message;
use crate::error::{AppError, BoxError};
use crate::events::{Event, EventKind};

/// External supervisor of auxiliary background services.
#[async_trait]
pub trait Services: Send + Sync + 'static {
    /// Brings services up. Runs under the application's initialization timeout; `ctx` carries
    /// that deadline.
    async fn init(&self, ctx: Arc<dyn Context>) -> Result<(), BoxError>;

    /// Supervises running services until they stop or `ctx` is done.
    ///
    /// Any return ends the application; an error becomes the run's error if it is the first.
    async fn watch(&self, ctx: Arc<dyn Context>) -> Result<(), BoxError>;
}

/// Runs `services.init` bounded by `timeout`.
pub(crate) async fn init_services(
    app: &Arc<Application>,
    services: &dyn Services,
    timeout: Duration,
) -> Result<(), AppError> {
    let parent: Arc<dyn Context> = app.clone();
    let ctx: Arc<dyn Context> = WithTimeout::new(parent, timeout);

    let res = match tokio::time::timeout(timeout, services.init(ctx)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::Init(e)),
        Err(_elapsed) => Err(AppError::InitTimeout { timeout }),
    };

    match &res {
        Ok(()) => app.bus().publish(Event::new(EventKind::ServicesReady)),
        Err(e) => app.bus().publish(
            Event::new(EventKind::InitFailed)
                .with_reason(e.to_string())
                .with_timeout(timeout),
        ),
    }
    res
}

/// Runs `services.watch` to completion, then records its outcome and shuts the application down.
pub(crate) async fn watch_services(app: Arc<Application>, services: Arc<dyn Services>) {
    let ctx: Arc<dyn Context> = app.clone();
    let attempt = async move { services.watch(ctx).await };

    match AssertUnwindSafe(attempt).catch_unwind().await {
        Ok(Ok(())) => {
            app.bus().publish(Event::new(EventKind::WatchStopped));
        }
        Ok(Err(e)) => record_watch_failure(&app, e),
        Err(panic) => {
            let message = format!("watch panicked: {}", panic_message(&*panic));
            record_watch_failure(&app, message.into());
        }
    }
    app.shutdown();
}

fn record_watch_failure(app: &Application, err: BoxError) {
    app.bus()
        .publish(Event::new(EventKind::WatchFailed).with_reason(err.to_string()));
    app.set_error(AppError::Watch(err));
}
