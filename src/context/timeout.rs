//! # Deadline-bounded child context.
//!
//! [`WithTimeout`] derives from a parent [`Context`] and closes its own done latch when either
//! the deadline passes or the parent finishes. Used to bound service initialization.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use super::Context;
use crate::core::Latch;
use crate::error::ContextError;

/// Child context with a deadline.
///
/// The deadline timer runs on the current tokio runtime and is aborted on drop; dropping the
/// context also closes its latch, so nothing waiting on it is left behind.
pub struct WithTimeout {
    parent: Arc<dyn Context>,
    deadline: Instant,
    done: Latch,
    expired: Arc<AtomicBool>,
    timer: JoinHandle<()>,
}

impl WithTimeout {
    /// Creates a child of `parent` that finishes after `timeout`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(parent: Arc<dyn Context>, timeout: Duration) -> Arc<Self> {
        let deadline = Instant::now() + timeout;
        let done = Latch::child_of(&parent.done());
        let expired = Arc::new(AtomicBool::new(false));

        let timer = {
            let done = done.clone();
            let expired = Arc::clone(&expired);
            tokio::spawn(async move {
                tokio::select! {
                    _ = tokio::time::sleep_until(deadline.into()) => {
                        expired.store(true, Ordering::Release);
                        done.close();
                    }
                    _ = done.closed() => {}
                }
            })
        };

        Arc::new(Self {
            parent,
            deadline,
            done,
            expired,
            timer,
        })
    }
}

impl Context for WithTimeout {
    fn deadline(&self) -> Option<Instant> {
        match self.parent.deadline() {
            Some(parent) if parent < self.deadline => Some(parent),
            _ => Some(self.deadline),
        }
    }

    fn done(&self) -> Latch {
        self.done.clone()
    }

    fn err(&self) -> Option<ContextError> {
        if !self.done.is_closed() {
            return None;
        }
        if self.expired.load(Ordering::Acquire) {
            return Some(ContextError::DeadlineExceeded);
        }
        self.parent.err().or(Some(ContextError::DeadlineExceeded))
    }

    fn value(&self, key: &dyn Any) -> Option<&(dyn Any + Send + Sync)> {
        self.parent.value(key)
    }
}

impl Drop for WithTimeout {
    fn drop(&mut self) {
        self.timer.abort();
        self.done.close();
    }
}
