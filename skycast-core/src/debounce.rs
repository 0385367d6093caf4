use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs only the most recent of a burst of triggered actions, after a quiet
/// period with no further triggers.
///
/// Each `trigger` aborts whatever was pending and schedules the new action;
/// an aborted action never runs and missed triggers are not queued. Requires
/// a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action` after the quiet period, cancelling any pending one.
    pub fn trigger<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let quiet_period = self.quiet_period;
        let mut pending = lock(&self.pending);

        if let Some(previous) = pending.take() {
            previous.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            action.await;
        }));
    }

    /// Drop whatever is pending without scheduling a replacement.
    pub fn cancel(&self) {
        if let Some(previous) = lock(&self.pending).take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// A poisoned lock only means a panic elsewhere; the pending handle is still valid.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn a_single_trigger_fires_after_the_quiet_period() {
        let debouncer = Debouncer::new(Duration::from_millis(250));
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        debouncer.trigger(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_triggers_collapse_to_the_last_one() {
        let debouncer = Debouncer::new(Duration::from_millis(250));
        let seen = Arc::new(Mutex::new(Vec::new()));

        for payload in [1, 2, 3] {
            let seen = Arc::clone(&seen);
            debouncer.trigger(async move {
                lock(&seen).push(payload);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(400)).await;

        // exactly one execution, with the payload of the last trigger
        assert_eq!(*lock(&seen), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_fire_once() {
        let debouncer = Debouncer::new(Duration::from_millis(250));
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let counter = Arc::clone(&fired);
            debouncer.trigger(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(300)).await;
        }

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_the_pending_action() {
        let debouncer = Debouncer::new(Duration::from_millis(250));
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        debouncer.trigger(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
