//! REST client for the studio backend.
//!
//! Every call goes through [`StudioClient::send`], which maps transport
//! failures, non-2xx statuses and `"success": false` bodies to [`AppError`].
//! Collection responses are normalized here so callers never see the raw
//! wrapper shape.

mod auth;
mod booking;
mod catalog;
mod student;

use reqwest::RequestBuilder;
use serde_json::Value;
use shared_types::{AppConfig, AppError};
use std::time::Duration;

use crate::error_convert::{check_business_failure, reqwest_to_app_error, status_to_app_error};

/// Handle to the backend. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct StudioClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl StudioClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout_secs.max(1)),
        )
    }

    /// Attach a bearer token to every subsequent request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue one request and return its JSON body (`Null` for an empty body).
    async fn send(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(reqwest_to_app_error)?;
        let status = response.status();
        let body = response.text().await.map_err(reqwest_to_app_error)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Backend returned an error status");
            return Err(status_to_app_error(status, &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value = serde_json::from_str(&body).unwrap_or(Value::String(body));
        check_business_failure(&value)?;
        Ok(value)
    }
}

/// Percent-encode a path segment such as a username.
fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
