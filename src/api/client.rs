//! HTTP client for the records service
//!
//! One method per endpoint the smoke test touches. Each returns the raw
//! status and body so the caller decides what counts as failure.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::common::{Error, Result};

use super::types::{LoginRequest, UpdatePayload};

/// Status and body of a completed request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Checkpoints accept exactly 200, not any 2xx
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::decode(&self.url, e))
    }
}

/// Cookie-carrying session against one service
pub struct RecordsClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecordsClient {
    /// Build a session for `base_url`
    ///
    /// Cookies set by any response are replayed on later requests.
    /// `timeout` of `None` keeps reqwest's default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /login`, which primes the cookie jar
    pub async fn login_page(&self) -> Result<ApiResponse> {
        self.send(self.http.get(self.url("/login"))).await
    }

    /// `POST /api/auth/callback/credentials`
    pub async fn login(&self, request: &LoginRequest<'_>) -> Result<ApiResponse> {
        let url = self.url("/api/auth/callback/credentials");
        self.send(self.http.post(url).json(request)).await
    }

    /// `GET /api/records/{id}`
    pub async fn get_record(&self, id: u64) -> Result<ApiResponse> {
        self.send(self.http.get(self.record_url(id))).await
    }

    /// `PATCH /api/records/{id}`
    pub async fn patch_record(&self, id: u64, payload: &UpdatePayload) -> Result<ApiResponse> {
        self.send(self.http.patch(self.record_url(id)).json(payload))
            .await
    }

    fn record_url(&self, id: u64) -> String {
        self.url(&format!("/api/records/{}", id))
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let url = response.url().to_string();
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%url, %status, bytes = body.len(), "Response received");

        Ok(ApiResponse { url, status, body })
    }
}

/// Validate an http(s) base URL and strip trailing slashes
fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).map_err(|e| Error::invalid_url(raw, e))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::invalid_url(raw, "scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(Error::invalid_url(raw, "missing host"));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
