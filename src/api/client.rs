//! HTTP client for the residencial access-control backend.
//!
//! Thin authenticated wrapper over reqwest: JSON in, JSON out, bearer token
//! on every request, non-2xx statuses mapped to `ApiError`. The offline
//! fallback and queueing decisions live a layer up, in `ops`.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{NewVisit, VisitReceipt};

use super::{endpoints, ApiError};

/// HTTP request timeout in seconds.
/// 30s allows for slow backend responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the access-control backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        debug!(path, "GET response received");

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        debug!(path, "POST response received");

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Write endpoints =====
    // These are called both from the live write path and from queue replay.

    /// Register a visitor entry scan at the gate.
    pub async fn register_entry(&self, qr_data: &str) -> Result<serde_json::Value> {
        self.post(
            endpoints::GUARD_REGISTER_ENTRY,
            &serde_json::json!({ "qr_data": qr_data }),
        )
        .await
    }

    /// Register a visitor exit scan at the gate.
    pub async fn register_exit(&self, qr_data: &str) -> Result<serde_json::Value> {
        self.post(
            endpoints::GUARD_REGISTER_EXIT,
            &serde_json::json!({ "qr_data": qr_data }),
        )
        .await
    }

    /// Create a visit and obtain its QR receipt(s), one per visitor.
    pub async fn create_visit(&self, visit: &NewVisit) -> Result<Vec<VisitReceipt>> {
        self.post(endpoints::RESIDENT_CREATE_VISIT, visit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("https://api.example.com/").unwrap();
        assert_eq!(
            client.url(endpoints::ADMIN_STATS),
            "https://api.example.com/admin/estadisticas"
        );
    }

    #[test]
    fn test_auth_headers_carry_bearer_token() {
        let client = ApiClient::new("http://localhost:8000")
            .unwrap()
            .with_token("tok123".to_string());
        let headers = client.auth_headers().unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer tok123"
        );
    }

    #[test]
    fn test_auth_headers_empty_without_token() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        let headers = client.auth_headers().unwrap();
        assert!(headers.get(header::AUTHORIZATION).is_none());
    }
}
