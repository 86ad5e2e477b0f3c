// Application Layer - Worker pool and its configuration

pub mod config;
pub mod pool;
pub mod worker;

// Re-exports
pub use config::WorkerPoolConfig;
pub use pool::{WorkerPool, WorkerPoolBuilder};
pub use worker::{shutdown_channel, JobOutcome, ShutdownSender, ShutdownToken, Worker};
