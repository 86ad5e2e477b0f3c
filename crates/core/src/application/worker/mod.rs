// Worker - Job execution loop

pub mod constants;
mod panic_guard;
pub(crate) mod queue;
pub(crate) mod runner;
mod shutdown;

pub use panic_guard::{execute_guarded, PanicGuardResult};
pub use queue::JobQueue;
pub use runner::{JobOutcome, JobRunner};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Decrements the pool's active-worker count when the worker task ends,
/// however it ends.
struct ActiveGuard(Arc<AtomicUsize>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Worker consumes jobs from the shared queue until shutdown
pub struct Worker {
    id: usize,
    queue: JobQueue,
    runner: Arc<JobRunner>,
    active: Arc<AtomicUsize>,
}

impl Worker {
    /// The caller must already have counted this worker in `active`
    pub fn new(id: usize, queue: JobQueue, runner: Arc<JobRunner>, active: Arc<AtomicUsize>) -> Self {
        Self {
            id,
            queue,
            runner,
            active,
        }
    }

    /// Run worker loop with graceful shutdown support
    ///
    /// Waits on "job available" and "shutdown signalled" together. When both
    /// are ready `select!` picks one at random, so a worker may take one more
    /// job after the broadcast; jobs left behind are drained by the pool.
    pub async fn run(self, mut shutdown: ShutdownToken) {
        let _active = ActiveGuard(Arc::clone(&self.active));
        let log = Arc::clone(self.runner.log());
        log.info(&format!("ipstack: WorkerPool: worker{} started", self.id));

        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    log.info(&format!(
                        "ipstack: WorkerPool: worker{} received shutdown. Finishing",
                        self.id
                    ));
                    break;
                }
                job = self.queue.pop() => match job {
                    Some(ip) => {
                        self.runner.run_guarded(ip).await;
                    }
                    None => {
                        log.info(&format!(
                            "ipstack: WorkerPool: worker{} queue closed. Finishing",
                            self.id
                        ));
                        break;
                    }
                },
            }
        }
    }
}
