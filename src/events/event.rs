//! # Lifecycle events emitted by the application controller.
//!
//! The [`EventKind`] enum classifies events across three groups:
//! - **Startup**: run entered, services initialized or failed
//! - **Termination**: signal observed, hold-on requested, escalation, shutdown completed
//! - **Workers**: workload and service-watch outcomes, subscriber failures
//!
//! The [`Event`] struct carries a timestamp, a global sequence number and optional details.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! `ShutdownCompleted` is always published before the done latch closes, and `Stopped` is the
//! last event of a run.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use appctl::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::SignalReceived)
//!     .with_reason("SIGTERM")
//!     .with_timeout(Duration::from_secs(1));
//!
//! assert_eq!(ev.kind, EventKind::SignalReceived);
//! assert_eq!(ev.reason.as_deref(), Some("SIGTERM"));
//! assert_eq!(ev.timeout_ms, Some(1000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Startup ===
    /// `run` moved the application from `Init` to `Running`.
    Starting,

    /// Service supervisor `init` finished successfully.
    ServicesReady,

    /// Service supervisor `init` failed or timed out.
    ///
    /// Sets:
    /// - `reason`: error message
    /// - `timeout_ms`: initialization timeout
    InitFailed,

    // === Termination ===
    /// An OS termination signal was observed.
    ///
    /// Sets:
    /// - `reason`: signal name
    /// - `timeout_ms`: grace period before forced shutdown
    SignalReceived,

    /// `Running → HoldOn`: the workload should stop taking new work.
    ///
    /// Sets:
    /// - `reason`: recorded error, if the hold-on came from a failure
    HoldOnRequested,

    /// Grace period elapsed after a signal; forcing shutdown.
    ///
    /// Sets:
    /// - `timeout_ms`: the grace period
    EscalationFired,

    /// `HoldOn → Shutdown`: published right before the done latch closes.
    ShutdownCompleted,

    /// `run` is returning. Last event of a run.
    ///
    /// Sets:
    /// - `reason`: returned error, if any
    Stopped,

    // === Workers ===
    /// Workload returned `Ok(())`.
    MainStopped,

    /// Workload returned an error.
    ///
    /// Sets:
    /// - `reason`: error message
    MainFailed,

    /// Workload panicked.
    ///
    /// Sets:
    /// - `reason`: panic message
    MainPanicked,

    /// Service watch loop returned `Ok(())`.
    WatchStopped,

    /// Service watch loop returned an error.
    ///
    /// Sets:
    /// - `reason`: error message
    WatchFailed,

    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: panic message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: "full" or "closed"
    SubscriberOverflow,

    /// Subscriber worker was aborted or lost while draining at the end of a run.
    ///
    /// Published after [`EventKind::Stopped`]; visible to [`Application::events`](crate::Application::events)
    /// receivers only.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name, if known
    /// - `reason`: "drain timeout" or the join error
    SubscriberAborted,
}

impl EventKind {
    /// Returns a short stable label (kebab-case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::Starting => "starting",
            EventKind::ServicesReady => "services-ready",
            EventKind::InitFailed => "init-failed",
            EventKind::SignalReceived => "signal-received",
            EventKind::HoldOnRequested => "hold-on-requested",
            EventKind::EscalationFired => "escalation-fired",
            EventKind::ShutdownCompleted => "shutdown-completed",
            EventKind::Stopped => "stopped",
            EventKind::MainStopped => "main-stopped",
            EventKind::MainFailed => "main-failed",
            EventKind::MainPanicked => "main-panicked",
            EventKind::WatchStopped => "watch-stopped",
            EventKind::WatchFailed => "watch-failed",
            EventKind::SubscriberPanicked => "subscriber-panicked",
            EventKind::SubscriberOverflow => "subscriber-overflow",
            EventKind::SubscriberAborted => "subscriber-aborted",
        }
    }
}

/// Lifecycle event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Human-readable detail (error message, signal name, overflow reason).
    pub reason: Option<Arc<str>>,
    /// Related timeout in milliseconds (grace period, init timeout).
    pub timeout_ms: Option<u32>,
    /// Subscriber name for subscriber events.
    pub subscriber: Option<&'static str>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            reason: None,
            timeout_ms: None,
            subscriber: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a timeout duration (stored as milliseconds, saturating).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        let mut ev = Event::new(EventKind::SubscriberOverflow).with_reason(reason);
        ev.subscriber = Some(subscriber);
        ev
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        let mut ev = Event::new(EventKind::SubscriberPanicked).with_reason(info);
        ev.subscriber = Some(subscriber);
        ev
    }

    /// Creates a subscriber abort event.
    #[inline]
    pub fn subscriber_aborted(subscriber: &'static str, reason: impl Into<Arc<str>>) -> Self {
        let mut ev = Event::new(EventKind::SubscriberAborted).with_reason(reason);
        ev.subscriber = Some(subscriber);
        ev
    }

    /// Returns `true` for the terminal event of a run.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::Stopped)
    }
}
