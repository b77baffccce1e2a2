//! HTTP client for the review-status endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::config::Config;
use crate::error::FetchError;

/// Source of review-status payloads.
///
/// [`StatusClient`] is the production implementation; tests substitute
/// scripted sources.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch everything that changed since the given Unix timestamp.
    async fn fetch(&self, since: i64) -> Result<Value, FetchError>;
}

#[async_trait]
impl<T: StatusSource + ?Sized> StatusSource for Arc<T> {
    async fn fetch(&self, since: i64) -> Result<Value, FetchError> {
        (**self).fetch(since).await
    }
}

/// Fetches review statuses over HTTP.
#[derive(Debug, Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl StatusClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(endpoint: Url, token: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, endpoint, token))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, endpoint: Url, token: impl Into<String>) -> Self {
        Self {
            http,
            endpoint,
            token: token.into(),
        }
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(
            config.endpoint.clone(),
            config.practicum_token.clone(),
            config.http_timeout,
        )
    }

    /// The endpoint this client queries.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn fetch(&self, since: i64) -> Result<Value, FetchError> {
        let url = self.endpoint.to_string();
        debug!(url = %url, from_date = since, "Requesting homework statuses");

        let response = self
            .http
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await
            .map_err(|source| {
                error!(url = %url, error = %source, "Review endpoint is unreachable");
                FetchError::Transport {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(url = %url, status = status.as_u16(), "Review endpoint returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<Value>().await.map_err(|source| {
            error!(url = %url, error = %source, "Review endpoint returned invalid JSON");
            FetchError::Decode {
                status: status.as_u16(),
                url,
                source,
            }
        })
    }
}
