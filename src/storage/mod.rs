//! Storage module for persisting cities and locations
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - City upserts keyed by rank
//! - Location inserts guarded by a unique (city, category) search record
//! - Filtered projections over stored locations

mod schema;
mod sqlite;
mod traits;

pub use sqlite::{build_select, SqliteStorage};
pub use traits::{Storage, StorageError, StorageResult};

use crate::search::Location;
use std::path::Path;

/// Opens (creating if needed) a storage database
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// A location as read back from the database
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLocation {
    pub id: i64,
    pub city_id: i64,
    pub location: Location,
}

/// A persisted (city, category) search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub city: String,
    pub category: String,
    pub searched_at: String,
    pub location_count: u32,
}

/// Columns of the locations table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationColumn {
    Id,
    Name,
    City,
    CityId,
    Address,
    Categories,
    Rating,
    Price,
    Phone,
}

impl LocationColumn {
    /// Every column, in table order
    pub const ALL: [LocationColumn; 9] = [
        Self::Id,
        Self::Name,
        Self::City,
        Self::CityId,
        Self::Address,
        Self::Categories,
        Self::Rating,
        Self::Price,
        Self::Phone,
    ];

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Name => "Name",
            Self::City => "City",
            Self::CityId => "CityId",
            Self::Address => "Address",
            Self::Categories => "Categories",
            Self::Rating => "Rating",
            Self::Price => "Price",
            Self::Phone => "Phone",
        }
    }

    pub fn from_sql(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.as_sql().eq_ignore_ascii_case(name))
    }
}
