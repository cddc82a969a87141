//! Cooperative cancellation for long diff runs.
//!
//! The engine checks the token once at the entry of every recursive range
//! call. Calls are bounded by the element count, so a tripped token stops the
//! run quickly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{DiffError, SeqResult};

/// Shared cancel flag with an optional deadline.
///
/// Clones share the flag, so one clone can be handed to the thread running
/// the diff and another kept by the caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Create a token that is never tripped until [`cancel`](Self::cancel).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token that also trips once `timeout` has elapsed.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Set an absolute deadline on this token.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Fail if the token was cancelled or its deadline passed.
    pub fn check(&self) -> SeqResult<()> {
        if self.is_cancelled() {
            return Err(DiffError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(DiffError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
