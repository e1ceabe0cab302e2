//! # OS signal handling and forced-shutdown escalation.
//!
//! [`SignalSource`] abstracts signal delivery; [`OsSignals`] is the default.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGHUP` (terminal hang-up, also sent by some process managers)
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`], reported as [`TermSignal::Interrupt`]
//!
//! ## Escalation
//! ```text
//! signal ──► hold_on() ──► sleep(termination_timeout) ──► shutdown()
//! ```
//! If the workload exits during the grace period, shutdown already happened and the final
//! `shutdown()` is a no-op.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use crate::context::Context;
use crate::core::application::Application;
use crate::events::{Event, EventKind};

/// Termination signals handled by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermSignal {
    /// `SIGHUP`
    Hangup,
    /// `SIGINT` / Ctrl-C
    Interrupt,
    /// `SIGTERM`
    Terminate,
    /// `SIGQUIT`
    Quit,
}

impl TermSignal {
    /// Returns the conventional signal name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TermSignal::Hangup => "SIGHUP",
            TermSignal::Interrupt => "SIGINT",
            TermSignal::Terminate => "SIGTERM",
            TermSignal::Quit => "SIGQUIT",
        }
    }
}

impl fmt::Display for TermSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of termination signals.
///
/// `listen` is called once per run, from inside the runtime. Registration happens eagerly in
/// `listen`; the returned future completes on the first signal.
pub trait SignalSource: Send + Sync + 'static {
    /// Registers interest in termination signals.
    fn listen(&self) -> io::Result<BoxFuture<'static, TermSignal>>;
}

/// Real OS signals via [`tokio::signal`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSignals;

impl SignalSource for OsSignals {
    #[cfg(unix)]
    fn listen(&self) -> io::Result<BoxFuture<'static, TermSignal>> {
        use futures::FutureExt;
        use tokio::signal::unix::{SignalKind, signal};

        let mut sighup = signal(SignalKind::hangup())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigquit = signal(SignalKind::quit())?;

        Ok(async move {
            tokio::select! {
                Some(()) = sighup.recv()  => TermSignal::Hangup,
                Some(()) = sigint.recv()  => TermSignal::Interrupt,
                Some(()) = sigterm.recv() => TermSignal::Terminate,
                Some(()) = sigquit.recv() => TermSignal::Quit,
                else => std::future::pending::<TermSignal>().await,
            }
        }
        .boxed())
    }

    #[cfg(not(unix))]
    fn listen(&self) -> io::Result<BoxFuture<'static, TermSignal>> {
        use futures::FutureExt;

        Ok(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => TermSignal::Interrupt,
                Err(_) => std::future::pending::<TermSignal>().await,
            }
        }
        .boxed())
    }
}

/// Waits for `signal`, requests hold-on, then forces shutdown after `grace`.
pub(crate) async fn watch_signals(
    app: Arc<Application>,
    signal: BoxFuture<'static, TermSignal>,
    grace: Duration,
) {
    let sig = signal.await;
    app.bus().publish(
        Event::new(EventKind::SignalReceived)
            .with_reason(sig.as_str())
            .with_timeout(grace),
    );
    app.hold_on();

    tokio::time::sleep(grace).await;
    if !app.done().is_closed() {
        app.bus()
            .publish(Event::new(EventKind::EscalationFired).with_timeout(grace));
    }
    app.shutdown();
}
