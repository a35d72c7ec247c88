//! Business search
//!
//! This module handles:
//! - The closed list of restaurant categories offered to the user
//! - Location records built from search results
//! - Cached, bearer-authenticated queries against the search API

mod mapper;

pub use mapper::map_businesses;

use crate::cache::ResponseCache;
use crate::config::SearchConfig;
use crate::fetch::{fetch_json, read_api_key, FetchError};
use crate::TastemapError;
use reqwest::Client;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Text shown (and exported) for a field the search API did not provide
pub const UNAVAILABLE: &str = "unavailable";

/// Errors raised when a search response does not have the expected shape
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API error: {0}")]
    Api(String),

    #[error("Search response has no `businesses` array")]
    MissingBusinesses,

    #[error("Business {index} is malformed: {reason}")]
    MalformedBusiness { index: usize, reason: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Restaurant categories that can be searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    American,
    British,
    Chinese,
    Indian,
}

impl Category {
    /// Every category, in menu order
    pub const ALL: [Category; 4] = [
        Category::American,
        Category::British,
        Category::Chinese,
        Category::Indian,
    ];

    /// Search term and stored category label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::American => "American",
            Self::British => "British",
            Self::Chinese => "Chinese",
            Self::Indian => "Indian",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SearchError::UnknownCategory(wanted.to_string()))
    }
}

/// A business returned by the search API for one (city, category) pair
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,

    /// Name of the ranked city that was searched
    pub city: String,

    pub address: Option<String>,

    /// Category label of the search that found this business
    pub categories: String,

    /// `None` when the API reported no rating
    pub rating: Option<f64>,

    /// Price tier such as `"$$"`, `None` when unavailable
    pub price: Option<String>,

    pub phone: Option<String>,
}

impl Location {
    pub fn rating_label(&self) -> String {
        self.rating
            .map(|rating| format!("{:.1}", rating))
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    pub fn price_label(&self) -> &str {
        self.price.as_deref().unwrap_or(UNAVAILABLE)
    }

    pub fn phone_label(&self) -> &str {
        self.phone.as_deref().unwrap_or(UNAVAILABLE)
    }

    pub fn address_label(&self) -> &str {
        self.address.as_deref().unwrap_or(UNAVAILABLE)
    }
}

/// Cached client for the business search API
pub struct BusinessSearch {
    client: Client,
    endpoint: String,
    limit: u32,
    api_key_env: String,
    api_key: Option<String>,
}

impl BusinessSearch {
    /// Creates a search client, reading the bearer token from the environment
    ///
    /// A missing token is not an error here: cached searches still work, and
    /// only a search that must reach the network fails with
    /// `FetchError::MissingApiKey`.
    pub fn from_config(client: Client, config: &SearchConfig) -> Self {
        let api_key = match read_api_key(&config.api_key_env) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!("{}; only cached searches are available", e);
                None
            }
        };

        Self {
            client,
            endpoint: config.endpoint.clone(),
            limit: config.limit,
            api_key_env: config.api_key_env.clone(),
            api_key,
        }
    }

    /// Creates a search client with an explicit bearer token
    pub fn with_api_key(client: Client, config: &SearchConfig, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            limit: config.limit,
            api_key_env: config.api_key_env.clone(),
            api_key: Some(api_key.into()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Finds businesses of `category` in `city`, through the response cache
    pub async fn search(
        &self,
        cache: &mut ResponseCache,
        city: &str,
        category: Category,
    ) -> Result<Vec<Location>, TastemapError> {
        let limit = self.limit.to_string();
        let params = [
            ("location", city),
            ("term", category.as_str()),
            ("limit", limit.as_str()),
        ];

        let response = cache
            .get_or_fetch(&self.endpoint, &params, move || async move {
                let api_key = self
                    .api_key
                    .as_deref()
                    .ok_or_else(|| FetchError::MissingApiKey(self.api_key_env.clone()))?;
                let response = fetch_json(&self.client, &self.endpoint, &params, api_key).await?;
                // Cached responses never expire, so only cache what maps
                map_businesses(&response, city, category)?;
                Ok::<_, TastemapError>(response)
            })
            .await?;

        let locations = map_businesses(&response, city, category)?;
        tracing::info!(
            "Found {} {} locations in {}",
            locations.len(),
            category,
            city
        );
        Ok(locations)
    }
}
