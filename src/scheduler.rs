//! Scheduler - the background tick loop driving the sampler.
//!
//! One dedicated tokio task owns the loop: take a sample, append it to the
//! store, log the counts, sleep until the next tick. Cycles never overlap -
//! the interval timer defers a tick while a slow cycle is still running - and
//! nothing that happens inside a cycle stops the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::registry::SourceRegistry;
use crate::sampler;
use crate::store::SeriesStore;

/// Drives polling cycles on a fixed wall-clock interval.
///
/// If the store is empty when the scheduler starts, one cycle runs
/// immediately so there is data to display before the first interval
/// elapses; otherwise the loaded history serves until the first tick.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use streamwatch::registry::SourceRegistry;
/// use streamwatch::scheduler::Scheduler;
/// use streamwatch::store::SeriesStore;
///
/// # tokio_test::block_on(async {
/// let registry = SourceRegistry::new();
/// let store = Arc::new(SeriesStore::load("scrobbler.historical.json").unwrap());
///
/// let handle = Scheduler::new(registry, store, Duration::from_secs(20)).start();
/// // ... serve requests ...
/// handle.stop();
/// # });
/// ```
#[derive(Debug)]
pub struct Scheduler {
    registry: SourceRegistry,
    store: Arc<SeriesStore>,
    interval: Duration,
}

impl Scheduler {
    /// Create a scheduler over a registry and store.
    pub fn new(registry: SourceRegistry, store: Arc<SeriesStore>, interval: Duration) -> Self {
        Self {
            registry,
            store,
            interval,
        }
    }

    /// Start the background tick loop.
    ///
    /// Returns a handle that can be used to stop the loop; the task otherwise
    /// runs for the life of the process.
    pub fn start(self) -> SchedulerHandle {
        use tokio::sync::watch;

        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            if self.store.is_empty() {
                // Bootstrap a first sample so the chart has data right away
                self.run_cycle().await;
            }

            let mut ticker =
                tokio::time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.run_cycle().await;
                    }
                    changed = stop_rx.changed() => {
                        // A dropped handle counts as a stop request
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        SchedulerHandle { stop_tx, task }
    }

    /// Run one cycle: sample, append, log.
    ///
    /// An append failure is logged and swallowed here - the sample is already
    /// retained in memory and the next cycle retries the flush.
    async fn run_cycle(&self) {
        let sample = sampler::take_sample(&self.registry).await;
        let counts = sample.view_counts.clone();

        match self.store.append(sample).await {
            Ok(()) => info!(viewers = ?counts, samples = self.store.len(), "recorded sample"),
            Err(e) => error!(error = %e, viewers = ?counts, "failed to persist sample"),
        }
    }
}

/// Handle for controlling the background tick loop.
#[derive(Debug)]
pub struct SchedulerHandle {
    stop_tx: tokio::sync::watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the tick loop after any in-flight cycle completes.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }

    /// Wait for the loop task to finish (after [`SchedulerHandle::stop`]).
    pub async fn join(self) -> Result<(), tokio::task::JoinError> {
        let _ = self.stop_tx.send(true);
        self.task.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use streamwatch_adapters::{AdapterError, ViewCountSource};
    use streamwatch_types::Sample;

    struct StaticSource(u64);

    #[async_trait]
    impl ViewCountSource for StaticSource {
        async fn view_count(&self) -> Result<u64, AdapterError> {
            Ok(self.0)
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ViewCountSource for FailingSource {
        async fn view_count(&self) -> Result<u64, AdapterError> {
            Err(AdapterError::Http("boom".to_string()))
        }
    }

    fn registry_with(count: u64) -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        registry.insert("a", StaticSource(count));
        registry
    }

    fn store_in(dir: &tempfile::TempDir) -> Arc<SeriesStore> {
        Arc::new(SeriesStore::load(dir.path().join("history.json")).unwrap())
    }

    #[tokio::test]
    async fn empty_store_gets_immediate_bootstrap_sample() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        // Long interval: only the bootstrap cycle can run during this test
        let handle = Scheduler::new(registry_with(42), store.clone(), Duration::from_secs(3600))
            .start();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot().last().unwrap().get("a"), Some(42));

        handle.join().await.unwrap();
    }

    #[tokio::test]
    async fn non_empty_store_waits_for_first_interval() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut seeded = Sample::new(chrono::Utc::now());
        seeded.record("a", 1);
        store.append(seeded).await.unwrap();

        let handle = Scheduler::new(registry_with(42), store.clone(), Duration::from_secs(3600))
            .start();

        tokio::time::sleep(Duration::from_millis(100)).await;
        // No immediate cycle: the pre-loaded sample is still the only one
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot().last().unwrap().get("a"), Some(1));

        handle.join().await.unwrap();
    }

    #[tokio::test]
    async fn ticks_keep_appending() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let handle =
            Scheduler::new(registry_with(42), store.clone(), Duration::from_millis(20)).start();

        tokio::time::sleep(Duration::from_millis(200)).await;
        // Bootstrap plus several ticks
        assert!(store.len() >= 3, "expected >= 3 samples, got {}", store.len());

        handle.join().await.unwrap();
    }

    #[tokio::test]
    async fn failing_source_does_not_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut registry = SourceRegistry::new();
        registry.insert("good", StaticSource(7));
        registry.insert("bad", FailingSource);

        let handle = Scheduler::new(registry, store.clone(), Duration::from_millis(20)).start();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(store.len() >= 3);
        let last = store.snapshot().last().unwrap().clone();
        assert_eq!(last.get("good"), Some(7));
        assert_eq!(last.get("bad"), None);

        handle.join().await.unwrap();
    }

    #[tokio::test]
    async fn persistence_failure_does_not_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        // Unwritable history location: every persist fails
        let store =
            Arc::new(SeriesStore::load(dir.path().join("missing").join("history.json")).unwrap());

        let handle =
            Scheduler::new(registry_with(42), store.clone(), Duration::from_millis(20)).start();

        tokio::time::sleep(Duration::from_millis(200)).await;
        // In-memory series keeps growing even though every flush failed
        assert!(store.len() >= 3);

        handle.join().await.unwrap();
    }

    #[tokio::test]
    async fn stop_ends_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let handle =
            Scheduler::new(registry_with(1), store.clone(), Duration::from_millis(20)).start();
        tokio::time::sleep(Duration::from_millis(50)).await;

        handle.join().await.unwrap();
        let len_at_stop = store.len();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.len(), len_at_stop);
    }
}
