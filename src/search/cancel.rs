//! Cooperative cancellation flag shared between a search and its caller

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to one stop flag.
///
/// Any clone may raise the flag from any thread. The search polls it at
/// every node and unwinds with its best completed result.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    stopped: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Idempotent.
    #[inline]
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Lower the flag before a new move request.
    #[inline]
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::Relaxed);
    }
}
