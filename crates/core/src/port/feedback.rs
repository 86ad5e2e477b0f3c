// Feedback Port
// Tells workers whether an IP was already resolved and stores new results

use crate::domain::{FeedbackError, GeoRecord};
use async_trait::async_trait;

/// Feedback trait
///
/// `exists` and `create_response` are independent calls. A caller that needs
/// them to be atomic for one IP must provide that inside its implementation.
#[async_trait]
pub trait FeedbackPort: Send + Sync {
    /// Check whether `ip` already has a stored result
    async fn exists(&self, ip: &str) -> Result<bool, FeedbackError>;

    /// Store the lookup result for `ip`
    async fn create_response(&self, ip: &str, record: GeoRecord) -> Result<(), FeedbackError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory feedback that records every call
    #[derive(Default)]
    pub struct MockFeedback {
        existing: Mutex<HashSet<String>>,
        fail_exists: HashSet<String>,
        fail_create: HashSet<String>,
        exists_calls: Mutex<Vec<String>>,
        created: Mutex<Vec<(String, GeoRecord)>>,
    }

    impl MockFeedback {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn with_existing(self, ip: impl Into<String>) -> Self {
            self.existing.lock().unwrap().insert(ip.into());
            self
        }
        pub fn failing_exists_for(mut self, ip: impl Into<String>) -> Self {
            self.fail_exists.insert(ip.into());
            self
        }
        pub fn failing_create_for(mut self, ip: impl Into<String>) -> Self {
            self.fail_create.insert(ip.into());
            self
        }
        pub fn exists_calls(&self) -> Vec<String> {
            self.exists_calls.lock().unwrap().clone()
        }
        pub fn created(&self) -> Vec<(String, GeoRecord)> {
            self.created.lock().unwrap().clone()
        }
        pub fn created_ips(&self) -> Vec<String> {
            self.created().into_iter().map(|(ip, _)| ip).collect()
        }
    }

    #[async_trait]
    impl FeedbackPort for MockFeedback {
        async fn exists(&self, ip: &str) -> Result<bool, FeedbackError> {
            self.exists_calls.lock().unwrap().push(ip.to_string());
            if self.fail_exists.contains(ip) {
                return Err(FeedbackError::Backend(format!("exists failed for {}", ip)));
            }
            Ok(self.existing.lock().unwrap().contains(ip))
        }

        async fn create_response(&self, ip: &str, record: GeoRecord) -> Result<(), FeedbackError> {
            if self.fail_create.contains(ip) {
                return Err(FeedbackError::Backend(format!("create failed for {}", ip)));
            }
            self.existing.lock().unwrap().insert(ip.to_string());
            self.created.lock().unwrap().push((ip.to_string(), record));
            Ok(())
        }
    }
}
