// Pool Logger Port
// The pool reports worker lifecycle and job failures only through this sink

use std::error::Error as StdError;

/// Logging sink for the worker pool
///
/// Kept as a narrow trait so the pool never writes to stdout/stderr on its
/// own. Use [`TracingLogger`] to route into `tracing`.
pub trait PoolLogger: Send + Sync {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str, err: &(dyn StdError + 'static));
}

/// Discards everything. Default sink of `WorkerPoolConfig`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl PoolLogger for NoopLogger {
    fn info(&self, _msg: &str) {}
    fn error(&self, _msg: &str, _err: &(dyn StdError + 'static)) {}
}

/// Forwards pool messages to `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl PoolLogger for TracingLogger {
    fn info(&self, msg: &str) {
        tracing::info!(target: "ipstack::pool", "{}", msg);
    }

    fn error(&self, msg: &str, err: &(dyn StdError + 'static)) {
        tracing::error!(target: "ipstack::pool", error = %err, "{}", msg);
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum LogLevel {
        Info,
        Error,
    }

    #[derive(Debug, Clone)]
    pub struct LogEntry {
        pub level: LogLevel,
        pub msg: String,
        pub err: Option<String>,
    }

    /// Logger that keeps every entry in memory
    #[derive(Default)]
    pub struct RecordingLogger {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl RecordingLogger {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn entries(&self) -> Vec<LogEntry> {
            self.entries.lock().unwrap().clone()
        }
        pub fn infos(&self) -> Vec<String> {
            self.entries()
                .into_iter()
                .filter(|e| e.level == LogLevel::Info)
                .map(|e| e.msg)
                .collect()
        }
        pub fn errors(&self) -> Vec<LogEntry> {
            self.entries()
                .into_iter()
                .filter(|e| e.level == LogLevel::Error)
                .collect()
        }
        /// Number of entries whose message contains `needle`
        pub fn count_containing(&self, needle: &str) -> usize {
            self.entries().iter().filter(|e| e.msg.contains(needle)).count()
        }
    }

    impl PoolLogger for RecordingLogger {
        fn info(&self, msg: &str) {
            self.entries.lock().unwrap().push(LogEntry {
                level: LogLevel::Info,
                msg: msg.to_string(),
                err: None,
            });
        }

        fn error(&self, msg: &str, err: &(dyn StdError + 'static)) {
            self.entries.lock().unwrap().push(LogEntry {
                level: LogLevel::Error,
                msg: msg.to_string(),
                err: Some(err.to_string()),
            });
        }
    }
}
