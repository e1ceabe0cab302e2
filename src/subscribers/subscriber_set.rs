//! # Non-blocking event fan-out to multiple subscribers.
//!
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → SubscriberPanicked
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//! ```
//!
//! ## Rules
//! - **Non-blocking**: `emit()` uses `try_send`.
//! - **Overflow**: event dropped for that subscriber only, `SubscriberOverflow` published.
//! - **Per-subscriber FIFO**; no ordering across subscribers.
//! - **Isolation**: a panicking subscriber is reported and keeps receiving events.
//! - **Bounded drain**: `shutdown()` waits at most the given timeout; workers still running are
//!   aborted and reported as `SubscriberAborted`.
//!
//! `AssertUnwindSafe` is used, which can leave shared state inconsistent if a subscriber
//! panics while holding a lock.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle, time::Instant};

use crate::core::panic_message;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for lifecycle-event subscribers.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<(&'static str, JoinHandle<()>)>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let name = sub.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));
            let bus_for_worker = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sub.on_event(ev.as_ref());
                    if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        bus_for_worker
                            .publish(Event::subscriber_panicked(name, panic_message(&*panic)));
                    }
                }
            });
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push((name, handle));
        }
        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits an event to all subscribers without waiting for them.
    ///
    /// Overflow events are not re-reported when they overflow themselves.
    pub fn emit(&self, event: Event) {
        let is_overflow_evt = matches!(event.kind, EventKind::SubscriberOverflow);
        let event = Arc::new(event);

        for channel in &self.channels {
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !is_overflow_evt {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }

    /// Closes all queues and waits up to `timeout` for workers to drain them.
    ///
    /// Workers still running at the deadline are aborted. Returns the names of subscribers that
    /// did not finish cleanly; each one is also published as [`EventKind::SubscriberAborted`].
    pub async fn shutdown(self, timeout: Duration) -> Vec<&'static str> {
        drop(self.channels);
        let deadline = Instant::now() + timeout;
        let mut aborted = Vec::new();

        for (name, mut h) in self.workers {
            let reason = match tokio::time::timeout_at(deadline, &mut h).await {
                Ok(Ok(())) => continue,
                Ok(Err(join_err)) => join_err.to_string(),
                Err(_elapsed) => {
                    h.abort();
                    "drain timeout".to_owned()
                }
            };
            self.bus.publish(Event::subscriber_aborted(name, reason));
            aborted.push(name);
        }
        aborted
    }
}
