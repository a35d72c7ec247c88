//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::scrape::City;
use crate::search::{Category, Location};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{LocationColumn, SearchRecord, StoredLocation};
use chrono::Utc;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        tracing::debug!("Opened database {}", path.display());
        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Builds the SELECT statement for a filtered projection over `Locations`
///
/// Identifiers only ever come from `LocationColumn`; filter values are left as
/// numbered placeholders in filter order.
///
/// # Example
///
/// ```
/// use tastemap::storage::{build_select, LocationColumn};
///
/// let sql = build_select(
///     &[LocationColumn::Name, LocationColumn::Rating],
///     &[LocationColumn::City, LocationColumn::Categories],
/// );
/// assert_eq!(
///     sql,
///     "SELECT Name, Rating FROM Locations WHERE City = ?1 AND Categories = ?2 ORDER BY Id"
/// );
/// ```
pub fn build_select(columns: &[LocationColumn], filters: &[LocationColumn]) -> String {
    let columns = if columns.is_empty() {
        &LocationColumn::ALL[..]
    } else {
        columns
    };

    let projection = columns
        .iter()
        .map(LocationColumn::as_sql)
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("SELECT {} FROM Locations", projection);

    if !filters.is_empty() {
        let conditions = filters
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column.as_sql(), i + 1))
            .collect::<Vec<_>>()
            .join(" AND ");
        sql.push_str(" WHERE ");
        sql.push_str(&conditions);
    }

    sql.push_str(" ORDER BY Id");
    sql
}

/// Maps a row selected with `LocationColumn::ALL`
fn stored_location_from_row(row: &Row<'_>) -> rusqlite::Result<StoredLocation> {
    Ok(StoredLocation {
        id: row.get(0)?,
        city_id: row.get(3)?,
        location: Location {
            name: row.get(1)?,
            city: row.get(2)?,
            address: row.get(4)?,
            categories: row.get(5)?,
            rating: row.get(6)?,
            price: row.get(7)?,
            phone: row.get(8)?,
        },
    })
}

fn city_from_row(row: &Row<'_>) -> rusqlite::Result<City> {
    Ok(City {
        rank: row.get(0)?,
        name: row.get(1)?,
        state: row.get(2)?,
        description: row.get(3)?,
    })
}

/// Looks up a city's rank by name on any connection or transaction
fn lookup_city_id(conn: &Connection, name: &str) -> StorageResult<i64> {
    conn.query_row(
        "SELECT Rank FROM Cities WHERE City = ?1 ORDER BY Rank LIMIT 1",
        params![name],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| StorageError::CityNotFound(name.to_string()))
}

impl Storage for SqliteStorage {
    // ===== Cities =====

    fn upsert_cities(&mut self, cities: &[City]) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO Cities (Rank, City, State, Info) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(Rank) DO UPDATE SET
                    City = excluded.City, State = excluded.State, Info = excluded.Info",
            )?;
            for city in cities {
                stmt.execute(params![city.rank, city.name, city.state, city.description])?;
            }
        }
        tx.commit()?;

        tracing::info!("Stored {} cities", cities.len());
        Ok(cities.len())
    }

    fn list_cities(&self) -> StorageResult<Vec<City>> {
        let mut stmt = self
            .conn
            .prepare("SELECT Rank, City, State, Info FROM Cities ORDER BY Rank")?;

        let cities = stmt
            .query_map([], city_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cities)
    }

    fn find_city(&self, name: &str) -> StorageResult<Option<City>> {
        let city = self
            .conn
            .query_row(
                "SELECT Rank, City, State, Info FROM Cities WHERE City = ?1 ORDER BY Rank LIMIT 1",
                params![name],
                city_from_row,
            )
            .optional()?;

        Ok(city)
    }

    fn city_id(&self, name: &str) -> StorageResult<i64> {
        lookup_city_id(&self.conn, name)
    }

    // ===== Locations =====

    fn upsert_locations(
        &mut self,
        city: &str,
        category: Category,
        locations: &[Location],
    ) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;

        let recorded = tx.execute(
            "INSERT OR IGNORE INTO Searches (City, Categories, SearchedAt, LocationCount)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                city,
                category.as_str(),
                Utc::now().to_rfc3339(),
                locations.len() as u32
            ],
        )?;

        if recorded == 0 {
            tracing::debug!("{} / {} already stored, skipping", city, category);
            return Ok(0);
        }

        // Rows are filed under the searched pair so `locations_for` finds them
        let city_id = lookup_city_id(&tx, city)?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO Locations (Name, City, CityId, Address, Categories, Rating, Price, Phone)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for location in locations {
                if location.city != city || location.categories != category.as_str() {
                    tracing::warn!(
                        "Filing {} ({} / {}) under {} / {}",
                        location.name,
                        location.city,
                        location.categories,
                        city,
                        category
                    );
                }
                stmt.execute(params![
                    location.name,
                    city,
                    city_id,
                    location.address,
                    category.as_str(),
                    location.rating,
                    location.price,
                    location.phone
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!(
            "Stored {} {} locations for {}",
            locations.len(),
            category,
            city
        );
        Ok(locations.len())
    }

    fn has_search(&self, city: &str, category: Category) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT Id FROM Searches WHERE City = ?1 AND Categories = ?2",
                params![city, category.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(found.is_some())
    }

    fn list_searches(&self) -> StorageResult<Vec<SearchRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT City, Categories, SearchedAt, LocationCount FROM Searches ORDER BY Id",
        )?;

        let searches = stmt
            .query_map([], |row| {
                Ok(SearchRecord {
                    city: row.get(0)?,
                    category: row.get(1)?,
                    searched_at: row.get(2)?,
                    location_count: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(searches)
    }

    fn query(
        &self,
        columns: &[LocationColumn],
        filters: &[(LocationColumn, SqlValue)],
    ) -> StorageResult<Vec<Vec<SqlValue>>> {
        let filter_columns: Vec<LocationColumn> = filters.iter().map(|(column, _)| *column).collect();
        let sql = build_select(columns, &filter_columns);
        let width = if columns.is_empty() {
            LocationColumn::ALL.len()
        } else {
            columns.len()
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(filters.iter().map(|(_, value)| value)), |row| {
                (0..width)
                    .map(|i| row.get::<_, SqlValue>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn locations_for(&self, city: &str, category: Category) -> StorageResult<Vec<StoredLocation>> {
        let sql = build_select(
            &LocationColumn::ALL,
            &[LocationColumn::City, LocationColumn::Categories],
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let locations = stmt
            .query_map(params![city, category.as_str()], stored_location_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locations)
    }

    // ===== Statistics =====

    fn count_cities(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Cities", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_locations(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM Locations", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
