//! # Application configuration.
//!
//! Provides [`AppConfig`] settings fixed when an [`Application`](crate::Application) is built.
//!
//! ## Sentinel values
//! - `termination_timeout = 0s` → default (1s)
//! - `initialization_timeout = 0s` → default (15s)
//! - `drain_timeout = 0s` → default (250ms)
//! - `bus_capacity = 0` → clamped to 1

use std::time::Duration;

const DEFAULT_TERMINATION_TIMEOUT: Duration = Duration::from_secs(1);
const DEFAULT_INITIALIZATION_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_millis(250);

/// Configuration for an application controller.
///
/// ## Field semantics
/// - `termination_timeout`: grace between a signal-driven hold-on and forced shutdown
/// - `initialization_timeout`: upper bound for service supervisor `init`
/// - `drain_timeout`: how long `run` waits for subscribers to drain after `Stopped`
/// - `bus_capacity`: lifecycle event ring buffer size
///
/// All fields are public; prefer the accessors, which resolve the zero sentinels.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Grace period after a termination signal before shutdown is forced.
    pub termination_timeout: Duration,

    /// Maximum time the service supervisor may spend in `init`.
    pub initialization_timeout: Duration,

    /// Upper bound on delivering queued events to subscribers once the run is over.
    pub drain_timeout: Duration,

    /// Capacity of the lifecycle event bus.
    pub bus_capacity: usize,
}

impl AppConfig {
    /// Returns the termination grace period, resolving `0s` to the default.
    #[inline]
    pub fn grace(&self) -> Duration {
        if self.termination_timeout == Duration::ZERO {
            DEFAULT_TERMINATION_TIMEOUT
        } else {
            self.termination_timeout
        }
    }

    /// Returns the initialization timeout, resolving `0s` to the default.
    #[inline]
    pub fn init_timeout(&self) -> Duration {
        if self.initialization_timeout == Duration::ZERO {
            DEFAULT_INITIALIZATION_TIMEOUT
        } else {
            self.initialization_timeout
        }
    }

    /// Returns the subscriber drain timeout, resolving `0s` to the default.
    #[inline]
    pub fn drain(&self) -> Duration {
        if self.drain_timeout == Duration::ZERO {
            DEFAULT_DRAIN_TIMEOUT
        } else {
            self.drain_timeout
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for AppConfig {
    /// Default configuration:
    ///
    /// - `termination_timeout = 1s`
    /// - `initialization_timeout = 15s`
    /// - `drain_timeout = 250ms`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            termination_timeout: DEFAULT_TERMINATION_TIMEOUT,
            initialization_timeout: DEFAULT_INITIALIZATION_TIMEOUT,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
            bus_capacity: 1024,
        }
    }
}
