//! # LogWriter — lifecycle events as `tracing` records
//!
//! Forwards each [`Event`] to `tracing` under the `appctl` target. Failures log at `warn`/`error`,
//! everything else at `info`/`debug`.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! INFO appctl: starting seq=0
//! WARN appctl: signal-received signal="SIGTERM" grace_ms=1000
//! INFO appctl: hold-on-requested
//! ERROR appctl: main-failed err="connection refused"
//! INFO appctl: shutdown-completed
//! INFO appctl: stopped
//! ```

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let label = e.kind.as_label();
        let reason = e.reason.as_deref().unwrap_or("");
        match e.kind {
            EventKind::Starting | EventKind::ServicesReady | EventKind::ShutdownCompleted => {
                info!(target: "appctl", seq = e.seq, "{label}");
            }
            EventKind::HoldOnRequested | EventKind::Stopped => {
                if reason.is_empty() {
                    info!(target: "appctl", seq = e.seq, "{label}");
                } else {
                    info!(target: "appctl", seq = e.seq, err = reason, "{label}");
                }
            }
            EventKind::SignalReceived => {
                warn!(target: "appctl", signal = reason, grace_ms = e.timeout_ms, "{label}");
            }
            EventKind::EscalationFired => {
                warn!(target: "appctl", grace_ms = e.timeout_ms, "{label}");
            }
            EventKind::MainStopped | EventKind::WatchStopped => {
                debug!(target: "appctl", seq = e.seq, "{label}");
            }
            EventKind::InitFailed => {
                error!(target: "appctl", err = reason, timeout_ms = e.timeout_ms, "{label}");
            }
            EventKind::MainFailed | EventKind::MainPanicked | EventKind::WatchFailed => {
                error!(target: "appctl", err = reason, "{label}");
            }
            EventKind::SubscriberOverflow
            | EventKind::SubscriberPanicked
            | EventKind::SubscriberAborted => {
                warn!(
                    target: "appctl",
                    subscriber = e.subscriber.unwrap_or("unknown"),
                    reason,
                    "{label}"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
