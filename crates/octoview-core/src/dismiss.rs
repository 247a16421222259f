// Cancellable one-shot delay.
//
// Used for timed dismissal of transient messages: the callback runs after
// the delay unless the guard is dropped first, so a component torn down
// before the timer fires never leaves a stray mutation behind.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Cancels the pending callback when dropped.
#[derive(Debug)]
pub struct DismissGuard {
    cancel: CancellationToken,
}

impl DismissGuard {
    /// Cancel explicitly (equivalent to dropping the guard).
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for DismissGuard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Run `callback` after `delay` unless the returned guard is dropped.
///
/// Must be called within a tokio runtime.
pub fn after(delay: Duration, callback: impl FnOnce() + Send + 'static) -> DismissGuard {
    let cancel = CancellationToken::new();
    let token = cancel.clone();

    tokio::spawn(async move {
        tokio::select! {
            biased;
            () = token.cancelled() => {}
            () = tokio::time::sleep(delay) => callback(),
        }
    });

    DismissGuard { cancel }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test(start_paused = true)]
    async fn fires_after_the_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let _guard = after(Duration::from_secs(1), move || {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_guard_cancels() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let guard = after(Duration::from_secs(1), move || {
            flag.store(true, Ordering::SeqCst);
        });
        drop(guard);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_cancel_matches_drop() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);

        let guard = after(Duration::from_secs(1), move || {
            flag.store(true, Ordering::SeqCst);
        });
        guard.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
