//! File-backed response cache
//!
//! The whole cache is one JSON object held in memory and rewritten to disk
//! after every miss. Entries never expire.

use crate::cache::fingerprint::fingerprint;
use crate::cache::{CacheError, CacheResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Cached responses keyed by request fingerprint (or by URL for pages)
#[derive(Debug)]
pub struct ResponseCache {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl ResponseCache {
    /// Loads the cache stored at `path`
    ///
    /// A missing or unparsable file yields an empty cache. The file is only
    /// created once the first entry is stored.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
                Ok(entries) => {
                    tracing::debug!("Loaded {} cache entries from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    tracing::warn!("Ignoring unparsable cache file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No cache file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!("Could not read cache file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Stores a value and rewrites the cache file
    ///
    /// If the file cannot be written the entry is rolled back, so memory never
    /// holds what disk does not.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> CacheResult<()> {
        let key = key.into();
        let previous = self.entries.insert(key.clone(), value);

        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.entries.insert(key, old),
                None => self.entries.remove(&key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Writes every entry to the backing file, replacing its contents
    pub fn flush(&self) -> CacheResult<()> {
        let content = serde_json::to_string(&self.entries).map_err(CacheError::Serialize)?;
        std::fs::write(&self.path, content)?;
        tracing::trace!("Flushed {} cache entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    /// Returns the cached response for `endpoint` + `params`, fetching it on a miss
    ///
    /// On a miss `fetch` is awaited, its result stored under the request
    /// fingerprint and the cache file rewritten. A failed fetch stores nothing.
    pub async fn get_or_fetch<F, Fut, E>(
        &mut self,
        endpoint: &str,
        params: &[(&str, &str)],
        fetch: F,
    ) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
        E: From<CacheError>,
    {
        let key = fingerprint(endpoint, params);

        if let Some(value) = self.entries.get(&key) {
            tracing::debug!("Using cache for {}", key);
            return Ok(value.clone());
        }

        tracing::debug!("Fetching {}", key);
        let value = fetch().await?;
        self.insert(key, value.clone())?;
        Ok(value)
    }

    /// Returns the cached page body for `url`, fetching it on a miss
    ///
    /// Pages are keyed by their URL alone and stored as JSON strings.
    pub async fn get_or_fetch_page<F, Fut, E>(&mut self, url: &str, fetch: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: From<CacheError>,
    {
        match self.entries.get(url) {
            Some(Value::String(body)) => {
                tracing::debug!("Using cache for {}", url);
                return Ok(body.clone());
            }
            Some(_) => tracing::warn!("Cached entry for {} is not a page, refetching", url),
            None => {}
        }

        tracing::debug!("Fetching {}", url);
        let body = fetch().await?;
        self.insert(url, Value::String(body.clone()))?;
        Ok(body)
    }
}
