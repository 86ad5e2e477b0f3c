// Bounded Job Queue
// Multi-producer, multi-consumer FIFO over a Tokio bounded channel

use super::constants::MIN_QUEUE_SIZE;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Bounded FIFO of IP addresses awaiting resolution
///
/// Producers are suspended while the queue is full. Consumers share the
/// single receiver behind an async mutex; a consumer waiting in [`pop`]
/// holds the lock, so dropping that future (e.g. a losing `select!` branch)
/// hands the queue to the next waiter.
///
/// [`pop`]: JobQueue::pop
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::Sender<String>,
    rx: Arc<Mutex<mpsc::Receiver<String>>>,
}

impl JobQueue {
    /// Create a queue holding at most `capacity` jobs (clamped to at least 1)
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(MIN_QUEUE_SIZE));
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Enqueue, waiting for a free slot
    pub async fn push(&self, ip: String) {
        // The queue owns its receiver, so the channel cannot be closed here.
        let _ = self.tx.send(ip).await;
    }

    /// Enqueue from synchronous code, blocking the thread for a free slot
    ///
    /// # Panics
    /// When called from within an asynchronous execution context.
    pub fn push_blocking(&self, ip: String) {
        let _ = self.tx.blocking_send(ip);
    }

    /// Dequeue the next job, waiting until one is available
    pub async fn pop(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }

    /// Take every job currently buffered without waiting for new ones
    pub async fn drain(&self) -> Vec<String> {
        let mut rx = self.rx.lock().await;
        let mut leftover = Vec::new();
        while let Ok(ip) = rx.try_recv() {
            leftover.push(ip);
        }
        leftover
    }

    /// Number of buffered jobs
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}
