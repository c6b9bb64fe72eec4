use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag for long route searches. Clones share the
/// same flag, so the caller keeps one handle and passes another to the search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Cancels the token when the returned guard is dropped, including when
    /// the owning future is dropped before it completes.
    pub fn guard(&self) -> CancelGuard {
        CancelGuard {
            token: self.clone(),
        }
    }
}

/// Cancels its token on drop. See [`CancelToken::guard`].
#[derive(Debug)]
#[must_use = "the token is cancelled as soon as the guard is dropped"]
pub struct CancelGuard {
    token: CancelToken,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
