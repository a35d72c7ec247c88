//! HTTP fetch layer
//!
//! Plain GET for the ranking page, bearer-authenticated GET for the search
//! API. Requests are awaited one at a time by the caller.

mod client;

pub use client::{build_http_client, fetch_json, fetch_page, read_api_key};

use thiserror::Error;

/// Errors that can occur while fetching remote resources
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{url} returned status {status}: {detail}")]
    Status {
        url: String,
        status: u16,
        detail: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("API key not found: environment variable {0} is not set")]
    MissingApiKey(String),
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
