//! reqwest-backed request helper

use crate::{
    error::{HostError, HostResult},
    traits::RequestHelper,
    types::{HttpMethod, HttpRequest},
};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("fillout-host/", env!("CARGO_PKG_VERSION"));

/// Request helper configuration
#[derive(Debug, Clone)]
pub struct RequestHelperConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RequestHelperConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Sends JSON requests with reqwest
#[derive(Debug, Clone)]
pub struct ReqwestRequestHelper {
    client: reqwest::Client,
}

impl ReqwestRequestHelper {
    pub fn new(config: RequestHelperConfig) -> HostResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| HostError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

#[async_trait::async_trait]
impl RequestHelper for ReqwestRequestHelper {
    async fn request(&self, request: HttpRequest) -> HostResult<Value> {
        let mut builder = self
            .client
            .request(Self::method(request.method), &request.url)
            .header("Accept", "application/json");

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(
                method = %request.method,
                url = %request.url,
                status = status.as_u16(),
                "Request failed"
            );
            return Err(HostError::Request {
                status: status.as_u16(),
                message: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| HostError::Request {
            status: status.as_u16(),
            message: format!("Invalid JSON response: {}", e),
        })
    }
}
