//! HTTP transport seam between the client and the upstream hosts.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::Timeout;
use crate::error::FetchError;

/// Fetches one JSON document from a fully constructed URL.
///
/// The production implementation is [`HttpTransport`]; tests substitute a
/// canned implementation to exercise caching and fallback without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Transport backed by a shared [`reqwest::Client`] honoring the configured
/// timeout.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Timeout) -> Self {
        let builder = match timeout {
            Timeout::Total(total) => reqwest::Client::builder().timeout(total),
            Timeout::ConnectRead { connect, read } => reqwest::Client::builder()
                .connect_timeout(connect)
                .timeout(read),
        };
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        // Strictly 200; anything else sends the caller to the next host.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Json {
            url: url.to_string(),
            source,
        })
    }
}
