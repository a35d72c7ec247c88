//! Statistics from the Tastemap database
//!
//! This module provides functionality for extracting and displaying
//! store statistics from the storage layer.

use crate::storage::{SearchRecord, Storage, StorageResult};

/// Store statistics summary
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    /// Number of ranked cities stored
    pub total_cities: u64,

    /// Number of locations stored
    pub total_locations: u64,

    /// Every persisted (city, category) search
    pub searches: Vec<SearchRecord>,
}

/// Loads statistics from storage
pub fn load_statistics(storage: &dyn Storage) -> StorageResult<StoreStatistics> {
    Ok(StoreStatistics {
        total_cities: storage.count_cities()?,
        total_locations: storage.count_locations()?,
        searches: storage.list_searches()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Tastemap Statistics ===\n");

    println!("Overview:");
    println!("  Ranked cities: {}", stats.total_cities);
    println!("  Stored locations: {}", stats.total_locations);
    println!("  Searches: {}", stats.searches.len());
    println!();

    if !stats.searches.is_empty() {
        println!("Searches:");
        let mut searches: Vec<_> = stats.searches.iter().collect();
        searches.sort_by(|a, b| {
            b.location_count
                .cmp(&a.location_count)
                .then_with(|| a.city.cmp(&b.city))
        });

        for search in searches {
            println!(
                "  {} / {}: {} locations (searched {})",
                search.city, search.category, search.location_count, search.searched_at
            );
        }
        println!();
    }
}
