//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::scrape::City;
use crate::search::{Category, Location};
use crate::storage::{LocationColumn, SearchRecord, StoredLocation};
use rusqlite::types::Value as SqlValue;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Every failure is returned to the caller; nothing is swallowed.
pub trait Storage {
    // ===== Cities =====

    /// Inserts or updates cities keyed by rank
    ///
    /// # Returns
    ///
    /// The number of cities written
    fn upsert_cities(&mut self, cities: &[City]) -> StorageResult<usize>;

    /// Gets all cities ordered by rank
    fn list_cities(&self) -> StorageResult<Vec<City>>;

    /// Gets a city by exact name
    fn find_city(&self, name: &str) -> StorageResult<Option<City>>;

    /// Looks up the identifier (rank) of a city by name
    fn city_id(&self, name: &str) -> StorageResult<i64>;

    // ===== Locations =====

    /// Persists the locations found for one (city, category) search
    ///
    /// The pair is recorded under a uniqueness constraint; if it was already
    /// persisted nothing is written and `Ok(0)` is returned. Every row is
    /// stored under `city` and `category`, whatever its own fields say. The
    /// city id is looked up at insert time, and an unknown city fails the whole
    /// batch with `StorageError::CityNotFound`.
    ///
    /// # Returns
    ///
    /// The number of locations inserted
    fn upsert_locations(
        &mut self,
        city: &str,
        category: Category,
        locations: &[Location],
    ) -> StorageResult<usize>;

    /// Checks whether a (city, category) pair has been persisted
    fn has_search(&self, city: &str, category: Category) -> StorageResult<bool>;

    /// Gets every persisted (city, category) pair
    fn list_searches(&self) -> StorageResult<Vec<SearchRecord>>;

    /// Filtered projection over the locations table
    ///
    /// `filters` form an exact-match conjunction. An empty `columns` slice
    /// selects every column. Rows come back in insertion order.
    fn query(
        &self,
        columns: &[LocationColumn],
        filters: &[(LocationColumn, SqlValue)],
    ) -> StorageResult<Vec<Vec<SqlValue>>>;

    /// Gets the stored locations of one (city, category) pair
    fn locations_for(&self, city: &str, category: Category) -> StorageResult<Vec<StoredLocation>>;

    // ===== Statistics =====

    /// Gets total city count
    fn count_cities(&self) -> StorageResult<u64>;

    /// Gets total location count
    fn count_locations(&self) -> StorageResult<u64>;
}
