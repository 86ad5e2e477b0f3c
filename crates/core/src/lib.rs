// ipstack Core - Domain, Ports & Resolution Pool
// NO infrastructure dependencies (hexagonal layout)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::{JobOutcome, WorkerPool, WorkerPoolBuilder, WorkerPoolConfig};
pub use domain::{FeedbackError, GeoRecord, LookupError};
pub use error::{JobError, PoolError, Result};
pub use port::{FeedbackPort, LookupPort, NoopLogger, PoolLogger, TracingLogger};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
