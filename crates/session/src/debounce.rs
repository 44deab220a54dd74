//! Trailing-edge debouncer for search-box input.
//!
//! Each [`Debouncer::schedule`] cancels the pending invocation (if any) and
//! starts a new quiet period. The callback runs only once the quiet period
//! elapses with no newer call. Nothing fires on the leading edge.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The single outstanding invocation.
struct PendingInvocation {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct Debouncer {
    delay: Duration,
    pending: Option<PendingInvocation>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending invocation with `callback`, to run after the
    /// quiet period.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => callback(),
            }
        });

        self.pending = Some(PendingInvocation { cancel, handle });
    }

    /// Drop the pending invocation. Returns `true` if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                let was_waiting = !pending.handle.is_finished();
                pending.cancel.cancel();
                was_waiting
            }
            None => false,
        }
    }

    /// True while an invocation is waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
