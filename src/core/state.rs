//! # Application state machine.
//!
//! [`StateCell`] holds the current [`AppState`] in an atomic and only moves it through
//! compare-and-swap on an exact `(from, to)` pair.
//!
//! ```text
//! Init ──run()──► Running ──hold_on()──► HoldOn ──shutdown()──► Shutdown
//! ```
//!
//! ## Rules
//! - States only move forward; there is no transition back.
//! - A failed transition has no side effect, so callers can treat it as a silent no-op.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle state of an [`Application`](crate::Application).
///
/// Ordered: `Init < Running < HoldOn < Shutdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum AppState {
    /// Created, `run` not called yet.
    Init = 0,
    /// `run` in progress, workload executing.
    Running = 1,
    /// Graceful stop requested; the workload should stop taking new work.
    HoldOn = 2,
    /// Terminal: the done latch is closed.
    Shutdown = 3,
}

impl AppState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => AppState::Init,
            1 => AppState::Running,
            2 => AppState::HoldOn,
            _ => AppState::Shutdown,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            AppState::Init => "init",
            AppState::Running => "running",
            AppState::HoldOn => "hold_on",
            AppState::Shutdown => "shutdown",
        }
    }
}

/// Atomic holder of an [`AppState`].
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(AppState::Init as u8))
    }

    /// Moves the state from `from` to `to`; returns `false` if the state was not `from`.
    #[inline]
    pub(crate) fn transition(&self, from: AppState, to: AppState) -> bool {
        debug_assert!(from < to, "state transitions only move forward");
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    #[inline]
    pub(crate) fn load(&self) -> AppState {
        AppState::from_u8(self.0.load(Ordering::Acquire))
    }
}
