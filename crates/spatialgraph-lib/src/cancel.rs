use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Number of rows (or settled nodes) processed between cancellation checks.
pub const CANCEL_CHECK_INTERVAL: usize = 256;

/// Externally owned signal polled by long-running loops.
///
/// Clones share the same flag, so a caller can keep one handle and pass
/// another into a query running on a different thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every query observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Poll the token when `processed` falls on a check boundary.
    pub(crate) fn should_abort(&self, processed: usize) -> bool {
        processed % CANCEL_CHECK_INTERVAL == 0 && self.is_cancelled()
    }
}

/// Result of an operation that may be cancelled before it finishes.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation ran to completion.
    Complete(T),
    /// The cancellation token fired; no partial result is kept.
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// The completed value, or `None` when cancelled.
    pub fn complete(self) -> Option<T> {
        match self {
            Outcome::Complete(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Complete(value) => Outcome::Complete(f(value)),
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }
}
