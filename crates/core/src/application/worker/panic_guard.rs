// Panic isolation for worker safety
use std::any::Any;
use std::future::Future;
use tracing::warn;

/// Result of a panic-guarded execution
#[derive(Debug)]
pub enum PanicGuardResult<T> {
    /// Execution completed successfully
    Success(T),
    /// Execution panicked
    Panicked(String),
    /// Task was cancelled before completing
    Cancelled(String),
}

/// Execute a future with panic isolation
///
/// The future runs in its own Tokio task, so a panic unwinds that task only
/// and surfaces here through the `JoinHandle`. This keeps a misbehaving port
/// from taking down the worker that called it.
///
/// # Example
/// ```text
/// let result = execute_guarded(async {
///     panic!("lookup blew up");
/// }).await;
///
/// assert!(matches!(result, PanicGuardResult::Panicked(_)));
/// ```
pub async fn execute_guarded<F, T>(future: F) -> PanicGuardResult<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(future).await {
        Ok(value) => PanicGuardResult::Success(value),
        Err(join_err) if join_err.is_panic() => {
            let panic_msg = panic_message(join_err.into_panic());
            warn!(panic_msg = %panic_msg, "Guarded task panicked");
            PanicGuardResult::Panicked(panic_msg)
        }
        Err(join_err) => PanicGuardResult::Cancelled(join_err.to_string()),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
