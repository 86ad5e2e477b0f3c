//! ipstack API Client
//!
//! Implements LookupPort with a single GET against the ipstack API.

use async_trait::async_trait;
use ipstack_core::domain::{GeoRecord, LookupError};
use ipstack_core::port::LookupPort;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Recommended request timeout (seconds) for calls to the ipstack API
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 5;

/// Host of the public ipstack API
pub const DEFAULT_API_HOST: &str = "api.ipstack.com";

/// Error body ipstack sends with HTTP 200 when a request is rejected
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiReply {
    Failure { error: ApiErrorBody },
    Record(GeoRecord),
}

/// ipstack API client
///
/// # Example
///
/// ```no_run
/// use ipstack_infra_http::IpstackClient;
/// use ipstack_core::port::LookupPort;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IpstackClient::new("my-access-key", false, 5)?;
/// let record = client.resolve("134.201.250.155").await?;
/// println!("{:?}", record.country_name);
/// # Ok(())
/// # }
/// ```
pub struct IpstackClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl IpstackClient {
    /// Create a client for the public API
    ///
    /// # Arguments
    ///
    /// * `access_key` - ipstack access key
    /// * `https` - use https; the free tier only offers plain http
    /// * `timeout_secs` - applied to connecting and to the whole request
    pub fn new(
        access_key: impl Into<String>,
        https: bool,
        timeout_secs: u64,
    ) -> Result<Self, LookupError> {
        let timeout = Duration::from_secs(timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(format!("Failed to create client: {}", e)))?;

        let scheme = if https { "https" } else { "http" };
        Ok(Self {
            http,
            base_url: format!("{}://{}", scheme, DEFAULT_API_HOST),
            access_key: access_key.into(),
        })
    }

    /// Point the client at another endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a single API call and decode the answer
    pub async fn check(&self, ip: &str) -> Result<GeoRecord, LookupError> {
        validate_ip(ip)?;

        let url = format!("{}/{}", self.base_url, ip);
        debug!(ip = %ip, "Querying ipstack");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("hostname", "1"),
                ("language", "en"),
                ("output", "json"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        match serde_json::from_slice::<ApiReply>(&body)
            .map_err(|e| LookupError::Decode(e.to_string()))?
        {
            ApiReply::Failure { error } => Err(LookupError::Api {
                code: error.code,
                kind: error.kind,
                info: error.info,
            }),
            ApiReply::Record(record) => Ok(record),
        }
    }
}

#[async_trait]
impl LookupPort for IpstackClient {
    async fn resolve(&self, ip: &str) -> Result<GeoRecord, LookupError> {
        self.check(ip).await
    }
}

/// Reject input that would change the request path or query
fn validate_ip(ip: &str) -> Result<(), LookupError> {
    if ip.is_empty() {
        return Err(LookupError::InvalidRequest("empty ip".to_string()));
    }
    if ip
        .chars()
        .any(|c| matches!(c, '/' | '?' | '#' | '%' | '&') || c.is_whitespace())
    {
        return Err(LookupError::InvalidRequest(format!(
            "ip contains url delimiters: {:?}",
            ip
        )));
    }
    Ok(())
}
