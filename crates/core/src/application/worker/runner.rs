// Per-job resolution: Exists -> Resolve -> CreateResponse

use super::constants::*;
use super::panic_guard::{execute_guarded, PanicGuardResult};
use crate::error::JobError;
use crate::port::{FeedbackPort, LookupPort, PoolLogger};
use std::sync::Arc;
use tracing::debug;

/// Terminal state of one processed job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Feedback already had a result; nothing was looked up
    AlreadyResolved,
    /// Looked up and stored
    Resolved,
    ExistsCheckFailed,
    LookupFailed,
    PersistFailed,
    Panicked,
    Cancelled,
}

/// Runs the per-job sequence shared by workers and the shutdown drain
pub struct JobRunner {
    lookup: Arc<dyn LookupPort>,
    feedback: Arc<dyn FeedbackPort>,
    log: Arc<dyn PoolLogger>,
}

impl JobRunner {
    pub fn new(
        lookup: Arc<dyn LookupPort>,
        feedback: Arc<dyn FeedbackPort>,
        log: Arc<dyn PoolLogger>,
    ) -> Self {
        Self {
            lookup,
            feedback,
            log,
        }
    }

    pub fn log(&self) -> &Arc<dyn PoolLogger> {
        &self.log
    }

    /// Process one IP. Every failing step is logged once and ends the job;
    /// nothing is retried.
    pub async fn resolve_entry(&self, ip: &str) -> JobOutcome {
        // check if ip already exists
        let exists = match self.feedback.exists(ip).await {
            Ok(exists) => exists,
            Err(e) => {
                self.log.error(ERR_FEEDBACK_EXISTS_FAILED, &e);
                return JobOutcome::ExistsCheckFailed;
            }
        };
        if exists {
            return JobOutcome::AlreadyResolved;
        }

        let record = match self.lookup.resolve(ip).await {
            Ok(record) => record,
            Err(e) => {
                self.log.error(ERR_API_REQUEST_FAILED, &e);
                return JobOutcome::LookupFailed;
            }
        };

        match self.feedback.create_response(ip, record).await {
            Ok(()) => JobOutcome::Resolved,
            Err(e) => {
                self.log.error(ERR_FEEDBACK_CREATE_RESPONSE_FAILED, &e);
                JobOutcome::PersistFailed
            }
        }
    }

    /// [`resolve_entry`](Self::resolve_entry) inside a panic-isolated task
    pub async fn run_guarded(self: &Arc<Self>, ip: String) -> JobOutcome {
        let runner = Arc::clone(self);
        let job_ip = ip.clone();
        let result = execute_guarded(async move { runner.resolve_entry(&job_ip).await }).await;
        let outcome = self.settle(result);
        debug!(ip = %ip, outcome = ?outcome, "Job finished");
        outcome
    }

    fn settle(&self, result: PanicGuardResult<JobOutcome>) -> JobOutcome {
        match result {
            PanicGuardResult::Success(outcome) => outcome,
            PanicGuardResult::Panicked(msg) => {
                self.log.error(ERR_JOB_PANICKED, &JobError::Panicked(msg));
                JobOutcome::Panicked
            }
            PanicGuardResult::Cancelled(msg) => {
                self.log.error(ERR_JOB_CANCELLED, &JobError::Cancelled(msg));
                JobOutcome::Cancelled
            }
        }
    }
}
