//! HTTP client wrapper.
//!
//! Non-success statuses are not errors here: every completed exchange is
//! snapshotted into a [`RawResponse`] and handed to the classifier. Only
//! transport failures (connect, timeout) surface as `Err`.

use crate::config::{AppConfig, NetworkConfig};
use crate::error::{LightboxError, Result};
use crate::query::QueryOptions;
use crate::response::RawResponse;
use reqwest::{header, Client, Method, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to a normalized base URL.
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, NetworkConfig::REQUEST_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(AppConfig::USER_AGENT)
            .build()
            .map_err(|e| LightboxError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET carrying the query built from `options`.
    pub async fn get(&self, path: &str, options: &QueryOptions) -> Result<RawResponse> {
        let url = format!("{}{}{}", self.base_url, path, options.get_options());
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::snapshot(Method::GET, response).await
    }

    /// Issue a PUT with a JSON body.
    pub async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("PUT {}", url);
        let response = self.client.put(&url).json(body).send().await?;
        Self::snapshot(Method::PUT, response).await
    }

    /// Snapshot a completed exchange for classification.
    async fn snapshot(method: Method, response: Response) -> Result<RawResponse> {
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await?;

        Ok(RawResponse {
            method,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            location,
            body,
        })
    }
}
