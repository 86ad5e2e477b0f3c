// Domain Layer - Lookup records and port failure types

pub mod error;
pub mod record;

// Re-exports
pub use error::{FeedbackError, LookupError};
pub use record::{Connection, Currency, GeoRecord, Language, Location, Security, TimeZone};
