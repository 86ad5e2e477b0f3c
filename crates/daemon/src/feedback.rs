//! JSON-lines feedback adapter
//!
//! Writes one line per resolved IP and treats IPs already written during
//! this run as existing, so duplicate input costs no extra API calls.
//! Writes run on the blocking pool so a slow stdout never stalls a runtime
//! thread.

use async_trait::async_trait;
use ipstack_core::domain::{FeedbackError, GeoRecord};
use ipstack_core::port::FeedbackPort;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Serialize)]
struct ResolvedLine<'a> {
    ip: &'a str,
    resolved_at: String,
    record: &'a GeoRecord,
}

pub struct JsonLinesFeedback<W: Write + Send + 'static> {
    seen: Mutex<HashSet<String>>,
    out: Arc<Mutex<W>>,
}

impl<W: Write + Send + 'static> JsonLinesFeedback<W> {
    pub fn new(out: W) -> Self {
        Self {
            seen: Mutex::new(HashSet::new()),
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.seen.lock().map(|seen| seen.len()).unwrap_or(0)
    }

    #[cfg(test)]
    pub fn into_writer(self) -> Result<W, FeedbackError> {
        Arc::try_unwrap(self.out)
            .map_err(|_| FeedbackError::Backend("writer still in use".to_string()))?
            .into_inner()
            .map_err(|_| poisoned())
    }
}

fn poisoned() -> FeedbackError {
    FeedbackError::Backend("feedback lock poisoned".to_string())
}

#[async_trait]
impl<W: Write + Send + 'static> FeedbackPort for JsonLinesFeedback<W> {
    async fn exists(&self, ip: &str) -> Result<bool, FeedbackError> {
        let seen = self.seen.lock().map_err(|_| poisoned())?;
        Ok(seen.contains(ip))
    }

    async fn create_response(&self, ip: &str, record: GeoRecord) -> Result<(), FeedbackError> {
        let line = serde_json::to_string(&ResolvedLine {
            ip,
            resolved_at: chrono::Utc::now().to_rfc3339(),
            record: &record,
        })?;

        let out = Arc::clone(&self.out);
        tokio::task::spawn_blocking(move || -> Result<(), FeedbackError> {
            let mut out = out.lock().map_err(|_| poisoned())?;
            writeln!(out, "{}", line)?;
            out.flush()?;
            Ok(())
        })
        .await
        .map_err(|e| FeedbackError::Backend(format!("write task failed: {}", e)))??;

        self.seen
            .lock()
            .map_err(|_| poisoned())?
            .insert(ip.to_string());
        Ok(())
    }
}
