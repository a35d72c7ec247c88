//! Tastemap: restaurant ratings for America's best places to live
//!
//! This crate scrapes a ranked list of cities, searches a business API for
//! restaurants in a chosen city and category, caches every response on disk,
//! stores the results in SQLite and aggregates the stored ratings and prices.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod output;
pub mod scrape;
pub mod search;
pub mod shell;
pub mod storage;

use thiserror::Error;

/// Main error type for Tastemap operations
#[derive(Debug, Error)]
pub enum TastemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("Scrape error: {0}")]
    Scrape(#[from] scrape::ScrapeError),

    #[error("Search error: {0}")]
    Search(#[from] search::SearchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Tastemap operations
pub type Result<T> = std::result::Result<T, TastemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::{fingerprint, ResponseCache};
pub use config::Config;
pub use scrape::City;
pub use search::{Category, Location};
pub use storage::{SqliteStorage, Storage};
