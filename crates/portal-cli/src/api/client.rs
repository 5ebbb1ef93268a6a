//! HTTP API client for the portal backend
//!
//! Every request goes through [`ApiClient::read_response`], which applies the
//! shared rules: non-2xx statuses become [`CliError::HttpStatus`] with a
//! truncated body excerpt, and the content type decides how a successful body
//! is interpreted.

use crate::api::{endpoints, types::PingResponse};
use crate::config::Config;
use crate::error::{CliError, Result};
use reqwest::{multipart::Form, Client, Response};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// How a successful (2xx) response body is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// JSON is required; any other content type is an error
    Strict,
    /// JSON is parsed; anything else is wrapped as `{"ok": true, "raw": text}`
    Lenient,
}

/// API client for the portal backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_url(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        endpoints::resolve_url(&self.base_url, path)
    }

    /// Call the ping endpoint and decode its reply
    pub async fn ping(&self) -> Result<PingResponse> {
        let url = self.url(endpoints::PING);
        debug!(url = %url, "GET ping");

        let response = self.client.get(&url).send().await?;
        let value = Self::read_response(response, ResponseMode::Strict).await?;

        Ok(serde_json::from_value(value)?)
    }

    /// POST a JSON body to a processing endpoint
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(url = %url, "POST json");

        let response = self.client.post(&url).json(body).send().await?;

        Self::read_response(response, ResponseMode::Strict).await
    }

    /// POST a multipart form to an upload endpoint
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value> {
        let url = self.url(path);
        debug!(url = %url, boundary = %form.boundary(), "POST multipart");

        let response = self.client.post(&url).multipart(form).send().await?;

        Self::read_response(response, ResponseMode::Lenient).await
    }

    async fn read_response(response: Response, mode: ResponseMode) -> Result<Value> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = response.text().await?;

        debug!(status = status.as_u16(), content_type = %content_type, bytes = text.len(), "Response received");

        if !status.is_success() {
            return Err(CliError::http_status(status, &text));
        }

        if is_json(&content_type) {
            return Ok(serde_json::from_str(&text)?);
        }

        match mode {
            ResponseMode::Strict => Err(CliError::unexpected_content_type(content_type, &text)),
            ResponseMode::Lenient => Ok(json!({ "ok": true, "raw": text })),
        }
    }
}

/// Whether a Content-Type header value denotes JSON
pub fn is_json(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| m.essence_str() == mime::APPLICATION_JSON.essence_str())
        .unwrap_or(false)
}
