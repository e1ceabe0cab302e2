//! # One-shot broadcast latch.
//!
//! [`Latch`] is a read-only view over a [`CancellationToken`]: everyone holding a clone can wait
//! for it or poll it, but only the crate can close it. The application uses two of them:
//! `hold_on` (stop taking new work) and `done` (exit now).

use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// Broadcast signal that closes exactly once and never reopens.
///
/// Cheap to clone; all clones observe the same close.
#[derive(Clone, Debug)]
pub struct Latch {
    token: CancellationToken,
}

impl Latch {
    pub(crate) fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Creates a latch that closes together with `parent`, or earlier on its own.
    pub(crate) fn child_of(parent: &Latch) -> Self {
        Self {
            token: parent.token.child_token(),
        }
    }

    /// Returns `true` once the latch is closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns a future that completes once the latch is closed (immediately if it already
    /// is). The future owns its handle, so it can outlive `self`.
    pub fn closed(&self) -> WaitForCancellationFutureOwned {
        self.token.clone().cancelled_owned()
    }

    /// Returns a child token cancelled when this latch closes.
    ///
    /// Useful to hand the latch to APIs that take a [`CancellationToken`]; cancelling the child
    /// does not close the latch.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Closes the latch. Idempotent at the token level; callers gate it on a state transition.
    pub(crate) fn close(&self) {
        self.token.cancel();
    }
}
