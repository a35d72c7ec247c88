//! HTTP client construction and request helpers
//!
//! This module handles all HTTP requests made by Tastemap:
//! - Building the HTTP client with a descriptive user agent
//! - Plain GET requests for HTML pages
//! - Bearer-authenticated GET requests for JSON search results
//! - Error classification

use crate::config::UserAgentConfig;
use crate::fetch::FetchError;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use tastemap::config::UserAgentConfig;
/// use tastemap::fetch::build_http_client;
///
/// let config = UserAgentConfig {
///     name: "tastemap".to_string(),
///     version: "0.1.0".to_string(),
///     contact_url: "https://example.com/tastemap".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: Name/Version (+ContactURL)
    let user_agent = format!("{}/{} (+{})", config.name, config.version, config.contact_url);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its body as text
///
/// Any non-success status is an error; the body of an error page is never
/// handed to the caller (and so never cached).
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    tracing::debug!("GET {}", url);

    let response = client.get(url).send().await.map_err(|source| FetchError::Http {
        url: url.to_string(),
        source,
    })?;
    let response = ensure_success(url, response).await?;

    response.text().await.map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Fetches a JSON document from an endpoint with query parameters and a bearer token
pub async fn fetch_json(
    client: &Client,
    endpoint: &str,
    params: &[(&str, &str)],
    token: &str,
) -> Result<Value, FetchError> {
    tracing::debug!("GET {} {:?}", endpoint, params);

    let response = client
        .get(endpoint)
        .query(params)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|source| FetchError::Http {
            url: endpoint.to_string(),
            source,
        })?;
    let response = ensure_success(endpoint, response).await?;

    response.json::<Value>().await.map_err(|source| FetchError::Decode {
        url: endpoint.to_string(),
        source,
    })
}

/// Reads the search API bearer token from the named environment variable
pub fn read_api_key(env_name: &str) -> Result<String, FetchError> {
    match std::env::var(env_name) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(FetchError::MissingApiKey(env_name.to_string())),
    }
}

/// Turns a non-success response into `FetchError::Status`
///
/// Search APIs report failures as `{"error": {"description": ...}}`; when the
/// body has that shape the description is kept as the error detail.
async fn ensure_success(url: &str, response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/description")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    tracing::warn!("{} returned {}: {}", url, status.as_u16(), detail);

    Err(FetchError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        detail,
    })
}
