// Worker Pool Configuration

use super::worker::constants::{DEFAULT_QUEUE_SIZE, DEFAULT_WORKERS};
use crate::port::{NoopLogger, PoolLogger};
use std::fmt;
use std::sync::Arc;

/// Immutable settings of a [`WorkerPool`](super::WorkerPool)
///
/// `log` is optional only so a missing sink can be reported at construction;
/// [`Default`] always fills it with [`NoopLogger`].
#[derive(Clone)]
pub struct WorkerPoolConfig {
    /// Queue capacity. 0 is treated as 1.
    pub queue_size: usize,
    /// Number of workers, at least 1
    pub workers: usize,
    pub log: Option<Arc<dyn PoolLogger>>,
}

impl WorkerPoolConfig {
    pub fn new(queue_size: usize, workers: usize) -> Self {
        Self {
            queue_size,
            workers,
            ..Default::default()
        }
    }

    pub fn with_logger(mut self, log: Arc<dyn PoolLogger>) -> Self {
        self.log = Some(log);
        self
    }

    pub fn without_logger(mut self) -> Self {
        self.log = None;
        self
    }
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            queue_size: DEFAULT_QUEUE_SIZE,
            workers: DEFAULT_WORKERS,
            log: Some(Arc::new(NoopLogger)),
        }
    }
}

impl fmt::Debug for WorkerPoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPoolConfig")
            .field("queue_size", &self.queue_size)
            .field("workers", &self.workers)
            .field("log", &self.log.as_ref().map(|_| "<logger>"))
            .finish()
    }
}
