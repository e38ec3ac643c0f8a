//! Label-keyed delayed-task scheduler.
//!
//! Replaces ad hoc timer chains: scheduling under an existing label aborts
//! the pending task, so the two-phase post-request refresh and the
//! foreground settle delay coalesce deterministically.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Registry of pending delayed tasks, at most one per label.
#[derive(Debug, Default)]
pub struct TaskScheduler {
    tasks: Mutex<HashMap<&'static str, JoinHandle<()>>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`, aborting any pending task under the same
    /// label.
    pub async fn schedule<F>(&self, label: &'static str, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        if let Some(previous) = self.tasks.lock().await.insert(label, handle) {
            previous.abort();
            debug!(label, "Replaced pending delayed task");
        }
    }

    /// Abort a pending task. Returns whether one was registered.
    pub async fn cancel(&self, label: &str) -> bool {
        match self.tasks.lock().await.remove(label) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Abort every pending task.
    pub async fn cancel_all(&self) {
        let mut tasks = self.tasks.lock().await;
        for (label, handle) in tasks.drain() {
            handle.abort();
            debug!(label, "Cancelled delayed task");
        }
    }

    /// Number of tasks that have not finished yet.
    pub async fn pending(&self) -> usize {
        let mut tasks = self.tasks.lock().await;
        tasks.retain(|_, handle| !handle.is_finished());
        tasks.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn runs_after_delay() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        scheduler
            .schedule("t", Duration::from_millis(5), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending().await, 0);
    }

    #[tokio::test]
    async fn rescheduling_replaces_pending_task() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = Arc::clone(&fired);
            scheduler
                .schedule("t", Duration::from_millis(10), async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .await;
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        // Only the last scheduled task survives.
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_prevents_execution() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        scheduler
            .schedule("t", Duration::from_millis(10), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert!(scheduler.cancel("t").await);
        assert!(!scheduler.cancel("t").await);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn independent_labels_coexist() {
        let scheduler = TaskScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for label in ["short", "long"] {
            let counter = Arc::clone(&fired);
            scheduler
                .schedule(label, Duration::from_millis(5), async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .await;
        }

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }
}
