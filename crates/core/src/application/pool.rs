// Worker Pool - Queueing, dispatch and graceful shutdown

use super::config::WorkerPoolConfig;
use super::worker::constants::ERR_WORKER_ABORTED;
use super::worker::{shutdown_channel, JobQueue, JobRunner, ShutdownSender, Worker};
use crate::error::{JobError, PoolError, Result};
use crate::port::{FeedbackPort, LookupPort, PoolLogger};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Resolves IP addresses across a fixed set of concurrent workers
///
/// Callers hand IPs to [`submit`](Self::submit) and never wait on a network
/// round-trip, only on queue space. [`shutdown`](Self::shutdown) consumes
/// the pool, so the shutdown broadcast fires exactly once and no submission
/// can follow it.
///
/// # Example
/// ```text
/// let pool = WorkerPool::new(WorkerPoolConfig::default(), lookup, feedback)?;
/// pool.submit("134.201.250.155").await;
/// pool.shutdown().await;
/// ```
pub struct WorkerPool {
    queue: JobQueue,
    shutdown_tx: ShutdownSender,
    workers: Vec<JoinHandle<()>>,
    active: Arc<AtomicUsize>,
    runner: Arc<JobRunner>,
    log: Arc<dyn PoolLogger>,
    config: WorkerPoolConfig,
}

impl WorkerPool {
    /// Validate the parts and start `config.workers` workers
    ///
    /// Must be called from within a Tokio runtime. Never waits on a worker.
    pub fn new(
        config: WorkerPoolConfig,
        lookup: Arc<dyn LookupPort>,
        feedback: Arc<dyn FeedbackPort>,
    ) -> Result<Self> {
        Self::builder()
            .config(config)
            .lookup(lookup)
            .feedback(feedback)
            .build()
    }

    pub fn builder() -> WorkerPoolBuilder {
        WorkerPoolBuilder::default()
    }

    /// Queue `ip` for resolution, waiting while the queue is full
    ///
    /// Duplicates are accepted; the feedback port decides whether an IP
    /// still needs a lookup.
    pub async fn submit(&self, ip: impl Into<String>) {
        self.queue.push(ip.into()).await;
    }

    /// Blocking variant of [`submit`](Self::submit) for non-async threads
    ///
    /// # Panics
    /// When called from within an asynchronous execution context.
    pub fn submit_blocking(&self, ip: impl Into<String>) {
        self.queue.push_blocking(ip.into());
    }

    /// Jobs currently waiting in the queue
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Workers that have not exited yet
    pub fn active_workers(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &WorkerPoolConfig {
        &self.config
    }

    /// Stop all workers, then resolve whatever is still queued
    ///
    /// Broadcasts shutdown, joins every worker, and finally runs the
    /// leftover jobs on the calling task with the same per-job logic the
    /// workers use. Every IP submitted before this call is processed.
    pub async fn shutdown(self) {
        let WorkerPool {
            queue,
            shutdown_tx,
            workers,
            runner,
            log,
            ..
        } = self;

        // send shutdown signal
        shutdown_tx.shutdown();

        // wait for all to finish
        for handle in workers {
            if let Err(e) = handle.await {
                log.error(ERR_WORKER_ABORTED, &JobError::Cancelled(e.to_string()));
            }
        }

        // finish remaining IPs in the buffer
        let leftover = queue.drain().await;
        debug!(leftover = leftover.len(), "Draining queue after worker join");
        for ip in leftover {
            runner.run_guarded(ip).await;
        }

        info!("WorkerPool shut down");
    }
}

/// Collects the pool's collaborators; each missing part is its own error
#[derive(Default)]
pub struct WorkerPoolBuilder {
    config: Option<WorkerPoolConfig>,
    lookup: Option<Arc<dyn LookupPort>>,
    feedback: Option<Arc<dyn FeedbackPort>>,
}

impl WorkerPoolBuilder {
    pub fn config(mut self, config: WorkerPoolConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn lookup(mut self, lookup: Arc<dyn LookupPort>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn feedback(mut self, feedback: Arc<dyn FeedbackPort>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Check preconditions and start the workers
    ///
    /// # Errors
    /// - `MissingConfig`, `MissingLogger`, `MissingLookup`, `MissingFeedback`
    /// - `InvalidConfig` if `workers == 0`
    /// - `NoRuntime` outside a Tokio runtime
    ///
    /// No worker is started when an error is returned.
    pub fn build(self) -> Result<WorkerPool> {
        let config = self.config.ok_or(PoolError::MissingConfig)?;
        let log = config.log.clone().ok_or(PoolError::MissingLogger)?;
        let lookup = self.lookup.ok_or(PoolError::MissingLookup)?;
        let feedback = self.feedback.ok_or(PoolError::MissingFeedback)?;
        if config.workers == 0 {
            return Err(PoolError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PoolError::NoRuntime(e.to_string()))?;

        let queue = JobQueue::new(config.queue_size);
        let (shutdown_tx, shutdown_rx) = shutdown_channel();
        let runner = Arc::new(JobRunner::new(lookup, feedback, Arc::clone(&log)));
        let active = Arc::new(AtomicUsize::new(0));

        // start workers
        let mut workers = Vec::with_capacity(config.workers);
        for i in 0..config.workers {
            active.fetch_add(1, Ordering::SeqCst);
            let worker = Worker::new(i + 1, queue.clone(), Arc::clone(&runner), Arc::clone(&active));
            workers.push(runtime.spawn(worker.run(shutdown_rx.clone())));
        }

        info!(
            workers = config.workers,
            queue_size = queue.capacity(),
            "WorkerPool started"
        );

        Ok(WorkerPool {
            queue,
            shutdown_tx,
            workers,
            active,
            runner,
            log,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::feedback::mocks::MockFeedback;
    use crate::port::logger::mocks::RecordingLogger;
    use crate::port::lookup::mocks::MockLookup;

    fn parts() -> (Arc<dyn LookupPort>, Arc<dyn FeedbackPort>) {
        (Arc::new(MockLookup::new_success()), Arc::new(MockFeedback::new()))
    }

    #[tokio::test]
    async fn test_missing_parts_are_distinct_errors() {
        let (lookup, feedback) = parts();

        let err = WorkerPool::builder()
            .lookup(lookup.clone())
            .feedback(feedback.clone())
            .build()
            .err();
        assert_eq!(err, Some(PoolError::MissingConfig));

        let err = WorkerPool::new(WorkerPoolConfig::default().without_logger(), lookup.clone(), feedback.clone()).err();
        assert_eq!(err, Some(PoolError::MissingLogger));

        let err = WorkerPool::builder()
            .config(WorkerPoolConfig::default())
            .feedback(feedback)
            .build()
            .err();
        assert_eq!(err, Some(PoolError::MissingLookup));

        let err = WorkerPool::builder()
            .config(WorkerPoolConfig::default())
            .lookup(lookup)
            .build()
            .err();
        assert_eq!(err, Some(PoolError::MissingFeedback));
    }

    #[tokio::test]
    async fn test_zero_workers_rejected() {
        let (lookup, feedback) = parts();
        let err = WorkerPool::new(WorkerPoolConfig::new(10, 0), lookup, feedback).err();
        assert!(matches!(err, Some(PoolError::InvalidConfig(_))));
    }

    #[test]
    fn test_outside_runtime_rejected() {
        let (lookup, feedback) = parts();
        let err = WorkerPool::new(WorkerPoolConfig::default(), lookup, feedback).err();
        assert!(matches!(err, Some(PoolError::NoRuntime(_))));
    }

    #[tokio::test]
    async fn test_active_workers_tracked_until_shutdown() {
        let (lookup, feedback) = parts();
        let log = Arc::new(RecordingLogger::new());
        let pool = WorkerPool::new(
            WorkerPoolConfig::new(4, 3).with_logger(log.clone()),
            lookup,
            feedback,
        )
        .unwrap();
        assert_eq!(pool.active_workers(), 3);

        let active = Arc::clone(&pool.active);
        pool.shutdown().await;
        assert_eq!(active.load(Ordering::SeqCst), 0);
        assert_eq!(log.count_containing("received shutdown"), 3);
    }
}
