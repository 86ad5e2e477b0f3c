// ipstack Infrastructure - HTTP Adapters
// Implements: LookupPort

pub mod client;

pub use client::{IpstackClient, DEFAULT_API_HOST, DEFAULT_CLIENT_TIMEOUT_SECS};
