//! Cancellable one-shot timers for deferred room deletion.
//!
//! A timer is a spawned tokio task that sleeps for the configured delay and then
//! runs its callback. The returned [`TimerHandle`] is the only way to stop it.
//! Tests drive these timers with tokio's paused clock.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::AbortHandle;

static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a scheduled timer.
///
/// Passed to the callback so it can tell whether it is still the timer the
/// registry entry holds when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Handle to a scheduled timer.
///
/// Dropping the handle does not cancel the timer.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: TimerId,
    abort: AbortHandle,
}

impl TimerHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Cancels the timer.
    ///
    /// Idempotent: cancelling twice, or after the callback already ran, is a no-op.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the timer fired or was cancelled.
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// Runs `task` once after `delay` unless cancelled first.
///
/// Must be called from within a tokio runtime.
pub fn schedule<F, Fut>(delay: Duration, task: F) -> TimerHandle
where
    F: FnOnce(TimerId) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let id = TimerId(NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed));

    let join = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task(id).await;
    });

    TimerHandle {
        id,
        abort: join.abort_handle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn counting_timer(delay: Duration, fired: &Arc<AtomicUsize>) -> TimerHandle {
        let fired = fired.clone();
        schedule(delay, move |_| async move {
            fired.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let handle = counting_timer(Duration::from_secs(60), &fired);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let handle = counting_timer(Duration::from_secs(60), &fired);

        tokio::time::sleep(Duration::from_secs(30)).await;
        handle.cancel();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let fired = Arc::new(AtomicUsize::new(0));
        let handle = counting_timer(Duration::from_secs(60), &fired);

        handle.cancel();
        handle.cancel();
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_is_a_no_op() {
        let fired = Arc::new(AtomicUsize::new(0));
        let handle = counting_timer(Duration::from_secs(60), &fired);

        tokio::time::sleep(Duration::from_secs(61)).await;
        handle.cancel();
        handle.cancel();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_receives_its_own_id() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = seen.clone();
        let handle = schedule(Duration::from_secs(1), move |id| async move {
            *sink.lock().unwrap() = Some(id);
        });

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(*seen.lock().unwrap(), Some(handle.id()));
    }
}
