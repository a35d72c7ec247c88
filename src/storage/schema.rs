//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Tastemap database.
//! Tables are created if absent; there are no migrations.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Ranked cities scraped from the ranking page
CREATE TABLE IF NOT EXISTS Cities (
    Rank INTEGER PRIMARY KEY AUTOINCREMENT,
    City TEXT NOT NULL,
    State TEXT NOT NULL,
    Info TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cities_city ON Cities(City);

-- Businesses found per (city, category) search; CityId is looked up at insert time
CREATE TABLE IF NOT EXISTS Locations (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL,
    City TEXT NOT NULL,
    CityId INTEGER NOT NULL,
    Address TEXT,
    Categories TEXT NOT NULL,
    Rating REAL,
    Price TEXT,
    Phone TEXT
);

CREATE INDEX IF NOT EXISTS idx_locations_city_categories ON Locations(City, Categories);

-- One row per persisted (city, category) pair
CREATE TABLE IF NOT EXISTS Searches (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    City TEXT NOT NULL,
    Categories TEXT NOT NULL,
    SearchedAt TEXT NOT NULL,
    LocationCount INTEGER NOT NULL DEFAULT 0,
    UNIQUE(City, Categories)
);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
