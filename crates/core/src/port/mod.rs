// Port Layer - Interfaces for external collaborators

pub mod feedback;
pub mod logger;
pub mod lookup;

// Re-exports
pub use feedback::FeedbackPort;
pub use logger::{NoopLogger, PoolLogger, TracingLogger};
pub use lookup::LookupPort;
