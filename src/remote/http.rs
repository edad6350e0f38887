//! Shared HTTP plumbing for the hosted backend

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::config::RemoteConfig;
use crate::error::FinanceError;

/// A reqwest client bound to one project URL and its API key
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FinanceError> {
        let client = Client::builder()
            .user_agent(concat!("nomad-finance/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FinanceError::Remote(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Build a client from config, `None` when the remote is not configured
    pub fn from_config(config: &RemoteConfig) -> Result<Option<Self>, FinanceError> {
        if !config.is_configured() {
            return Ok(None);
        }
        Self::new(config.url.trim(), config.api_key.trim()).map(Some)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `path` carrying the API key
    ///
    /// Without an access token the API key doubles as the bearer, which is
    /// what the auth endpoints expect for anonymous calls.
    pub fn request(&self, method: Method, path: &str, access_token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token.unwrap_or(self.api_key.as_str()))
    }
}

/// Split a response into success or `(status, body)` for error classification
pub async fn check_status(response: Response) -> Result<Response, (StatusCode, String)> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err((status, body))
}

/// Shorten a response body for log and error messages
pub fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
