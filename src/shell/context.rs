//! Application context shared by the shell and the CLI modes
//!
//! Loaded once at start, the context owns the HTTP client, the response cache
//! (flushed on each write) and the database connection, and is dropped at exit.

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::fetch::{build_http_client, FetchError};
use crate::scrape::{load_city_rankings, City};
use crate::search::{BusinessSearch, Category, Location};
use crate::storage::{SqliteStorage, Storage};
use crate::Result;
use reqwest::Client;
use std::path::Path;

/// Everything a session needs, passed explicitly instead of held in globals
pub struct AppContext {
    pub config: Config,
    pub client: Client,
    pub cache: ResponseCache,
    pub storage: SqliteStorage,
    pub search: BusinessSearch,
}

impl AppContext {
    /// Builds the HTTP client, loads the cache and opens the database
    pub fn open(config: Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent).map_err(FetchError::Client)?;
        let cache = ResponseCache::load(&config.output.cache_path);
        let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
        let search = BusinessSearch::from_config(client.clone(), &config.search);

        tracing::info!(
            "Cache {} holds {} entries",
            cache.path().display(),
            cache.len()
        );

        Ok(Self {
            config,
            client,
            cache,
            storage,
            search,
        })
    }

    /// Scrapes the ranking page (through the cache) and upserts its cities
    pub async fn refresh_cities(&mut self, refresh: bool) -> Result<Vec<City>> {
        let cities = load_city_rankings(
            &self.client,
            &mut self.cache,
            &self.config.source.ranking_url,
            refresh,
        )
        .await?;

        self.storage.upsert_cities(&cities)?;
        Ok(cities)
    }

    /// Returns the stored locations of a pair, searching and storing them first if needed
    ///
    /// The rows handed back are always read from the database, so what the
    /// shell shows is exactly what was persisted.
    pub async fn ensure_locations(&mut self, city: &str, category: Category) -> Result<Vec<Location>> {
        if !self.storage.has_search(city, category)? {
            let found = self.search.search(&mut self.cache, city, category).await?;
            self.storage.upsert_locations(city, category, &found)?;
        } else {
            tracing::debug!("Using stored {} locations for {}", category, city);
        }

        Ok(crate::analysis::load_locations(&self.storage, city, category)?)
    }
}
