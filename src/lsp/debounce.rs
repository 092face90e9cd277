//! Per-key debounced tasks.
//!
//! Scheduling a task for a key aborts whatever is still pending for that key, so only the last edit in a burst
//! triggers a scan.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

pub struct Debouncer<K> {
    pending: Arc<Mutex<HashMap<K, Pending>>>,
    generation: AtomicU64,
}

impl<K> Default for Debouncer<K> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`, replacing any task still pending for `key`.
    pub async fn schedule<F>(&self, key: K, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        // Held across the spawn so the task cannot deregister before it is registered.
        let mut pending = self.pending.lock().await;

        let registry = Arc::clone(&self.pending);
        let own_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
            let mut pending = registry.lock().await;
            if pending.get(&own_key).is_some_and(|p| p.generation == generation) {
                pending.remove(&own_key);
            }
        });

        if let Some(previous) = pending.insert(key, Pending { generation, handle }) {
            previous.handle.abort();
        }
    }

    /// Abort the task pending for `key`, if any.
    pub async fn cancel(&self, key: &K) -> bool {
        match self.pending.lock().await.remove(key) {
            Some(p) => {
                p.handle.abort();
                true
            }
            None => false,
        }
    }

    pub async fn cancel_all(&self) {
        for (_, p) in self.pending.lock().await.drain() {
            p.handle.abort();
        }
    }

    /// Number of tasks scheduled and not yet finished.
    pub async fn pending(&self) -> usize {
        self.pending.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter_task(counter: &Arc<AtomicUsize>, add: usize) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(add, Ordering::SeqCst);
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_only_last_task() {
        let debouncer = Debouncer::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(300);

        debouncer.schedule("a.clar", delay, counter_task(&runs, 1)).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("a.clar", delay, counter_task(&runs, 10)).await;
        tokio::time::sleep(Duration::from_millis(250)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0, "nothing runs before the delay after the last edit");

        tokio::time::sleep(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 10);
        assert_eq!(debouncer.pending().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let debouncer = Debouncer::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(50);

        debouncer.schedule("a.clar", delay, counter_task(&runs, 1)).await;
        debouncer.schedule("b.clar", delay, counter_task(&runs, 1)).await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let debouncer = Debouncer::new();
        let runs = Arc::new(AtomicUsize::new(0));

        debouncer.schedule("a.clar", Duration::from_millis(50), counter_task(&runs, 1)).await;
        assert!(debouncer.cancel(&"a.clar").await);
        assert!(!debouncer.cancel(&"a.clar").await);
        tokio::time::sleep(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
