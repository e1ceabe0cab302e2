//! # Main runner: executes the workload behind a panic boundary.
//!
//! ## Flow
//! ```text
//! workload.spawn(ctx = app, hold_on)
//!     ├─ Ok(())   ─► publish MainStopped
//!     ├─ Err(e)   ─► publish MainFailed  ─► set_error(AppError::Main(e))
//!     └─ panic    ─► publish MainPanicked ─► set_error(AppError::Panicked { message })
//!     ▼
//! shutdown()   (every exit path)
//! ```
//!
//! ## Rules
//! - A panic never crosses back into the controller; it becomes an error value.
//! - `set_error` only records if it wins `Running → HoldOn`; otherwise the outcome is dropped.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::context::Context;
use crate::core::application::Application;
use crate::error::AppError;
use crate::events::{Event, EventKind};
use crate::workload::WorkloadRef;

/// Runs `main` to completion and shuts the application down.
pub(crate) async fn run_main(app: Arc<Application>, main: WorkloadRef) {
    let ctx: Arc<dyn Context> = app.clone();
    let hold_on = app.hold_on_latch();

    // The call to `spawn` happens inside the boundary too.
    let attempt = async move { main.spawn(ctx, hold_on).await };

    match AssertUnwindSafe(attempt).catch_unwind().await {
        Ok(Ok(())) => {
            app.bus().publish(Event::new(EventKind::MainStopped));
        }
        Ok(Err(e)) => {
            app.bus()
                .publish(Event::new(EventKind::MainFailed).with_reason(e.to_string()));
            app.set_error(AppError::Main(e));
        }
        Err(panic) => {
            let message = panic_message(&*panic);
            app.bus()
                .publish(Event::new(EventKind::MainPanicked).with_reason(message.as_str()));
            app.set_error(AppError::Panicked { message });
        }
    }
    app.shutdown();
}

/// Renders a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
