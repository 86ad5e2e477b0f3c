// Worker pool constants (No magic values)

/// Default capacity of the job queue
pub const DEFAULT_QUEUE_SIZE: usize = 1000;

/// Default number of workers
pub const DEFAULT_WORKERS: usize = 4;

/// Smallest queue a Tokio bounded channel supports
pub const MIN_QUEUE_SIZE: usize = 1;

/// Logged when `FeedbackPort::exists` returns an error
pub const ERR_FEEDBACK_EXISTS_FAILED: &str =
    "ipstack: WorkerPool: unable to check if ip already exists during feedback loop";

/// Logged when the lookup call fails or times out
pub const ERR_API_REQUEST_FAILED: &str = "ipstack: WorkerPool: error during api request";

/// Logged when `FeedbackPort::create_response` returns an error
pub const ERR_FEEDBACK_CREATE_RESPONSE_FAILED: &str =
    "ipstack: WorkerPool: unable to create response during feedback loop";

/// Logged when a port call panics while a job is processed
pub const ERR_JOB_PANICKED: &str = "ipstack: WorkerPool: job panicked and was abandoned";

/// Logged when a job's task is cancelled before it finishes
pub const ERR_JOB_CANCELLED: &str = "ipstack: WorkerPool: job was cancelled before finishing";

/// Logged when a worker task ends abnormally before being joined
pub const ERR_WORKER_ABORTED: &str = "ipstack: WorkerPool: worker task ended abnormally";
