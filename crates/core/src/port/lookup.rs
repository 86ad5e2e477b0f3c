// Lookup Port
// Abstraction over the remote "IP -> geolocation" call

use crate::domain::{GeoRecord, LookupError};
use async_trait::async_trait;

/// Lookup trait
///
/// Implementations:
/// - IpstackClient (infra-http): calls the ipstack HTTP API
#[async_trait]
pub trait LookupPort: Send + Sync {
    /// Resolve one IP address to its geolocation record
    ///
    /// # Errors
    /// Any error is a total failure for this call; there is no partial record.
    async fn resolve(&self, ip: &str) -> Result<GeoRecord, LookupError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::{Notify, Semaphore};

    /// Mock lookup with per-IP failure injection
    ///
    /// Optional `gate`: each resolve consumes one permit before answering,
    /// so tests can hold a worker inside a lookup.
    pub struct MockLookup {
        failing: HashSet<String>,
        panicking: HashSet<String>,
        delay: Option<Duration>,
        gate: Option<Arc<Semaphore>>,
        entered: Arc<Notify>,
        calls: Mutex<Vec<String>>,
    }

    impl MockLookup {
        pub fn new_success() -> Self {
            Self {
                failing: HashSet::new(),
                panicking: HashSet::new(),
                delay: None,
                gate: None,
                entered: Arc::new(Notify::new()),
                calls: Mutex::new(Vec::new()),
            }
        }
        pub fn failing_for(mut self, ip: impl Into<String>) -> Self {
            self.failing.insert(ip.into());
            self
        }
        pub fn panicking_for(mut self, ip: impl Into<String>) -> Self {
            self.panicking.insert(ip.into());
            self
        }
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
        pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
            self.gate = Some(gate);
            self
        }
        /// Notified every time a resolve call starts
        pub fn entered(&self) -> Arc<Notify> {
            Arc::clone(&self.entered)
        }
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LookupPort for MockLookup {
        async fn resolve(&self, ip: &str) -> Result<GeoRecord, LookupError> {
            self.calls.lock().unwrap().push(ip.to_string());
            self.entered.notify_one();

            if let Some(gate) = &self.gate {
                gate.acquire()
                    .await
                    .map_err(|e| LookupError::Transport(e.to_string()))?
                    .forget();
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.panicking.contains(ip) {
                panic!("mock lookup panicked for {}", ip); // for panic isolation testing
            }
            if self.failing.contains(ip) {
                return Err(LookupError::Transport(format!("mock failure for {}", ip)));
            }
            Ok(GeoRecord::for_ip(ip))
        }
    }
}
