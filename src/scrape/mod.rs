//! City ranking scraper
//!
//! This module handles:
//! - Fetching the ranking page through the response cache
//! - Extracting ranked city records from its fixed slide layout

mod ranking;

pub use ranking::{parse_city_rankings, split_title};

use crate::cache::ResponseCache;
use crate::fetch::fetch_page;
use crate::TastemapError;
use reqwest::Client;
use thiserror::Error;

/// A ranked city scraped from the ranking page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// Position in the ranking, starting at 1
    pub rank: u32,
    pub name: String,
    pub state: String,
    pub description: String,
}

/// Errors raised when the ranking page does not have the expected shape
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("No ranking slides found on the page")]
    NoRankings,

    #[error("Slide {index} is missing its `{element}` element")]
    MissingElement { index: usize, element: &'static str },

    #[error("Unexpected slide title: {0:?}")]
    InvalidTitle(String),

    #[error("Slide title has no valid rank: {0:?}")]
    InvalidRank(String),

    #[error("Invalid selector {selector}: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },
}

/// Result type for scrape operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Fetches (or reads from cache) the ranking page and extracts its cities
///
/// With `refresh` set the cached copy is ignored and replaced by a fresh fetch.
pub async fn load_city_rankings(
    client: &Client,
    cache: &mut ResponseCache,
    url: &str,
    refresh: bool,
) -> Result<Vec<City>, TastemapError> {
    let html = if refresh {
        tracing::info!("Refreshing ranking page {}", url);
        let body = fetch_page(client, url).await?;
        cache.insert(url, serde_json::Value::String(body.clone()))?;
        body
    } else {
        cache
            .get_or_fetch_page(url, move || async move {
                fetch_page(client, url).await.map_err(TastemapError::from)
            })
            .await?
    };

    Ok(parse_city_rankings(&html)?)
}
