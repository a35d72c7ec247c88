//! Aggregations over stored locations
//!
//! This module computes the views offered by the shell:
//! - Top-rated locations
//! - Average rating
//! - Rating distribution and histogram
//! - Price tier breakdown

mod pricing;
mod ratings;

pub use pricing::{price_breakdown, relabel_price, PriceShare};
pub use ratings::{average_rating, rating_distribution, top_rated, RatingHistogram, TOP_N};

use crate::search::{Category, Location};
use crate::storage::{Storage, StorageResult};

/// Loads the stored locations of one (city, category) pair
pub fn load_locations(
    storage: &dyn Storage,
    city: &str,
    category: Category,
) -> StorageResult<Vec<Location>> {
    Ok(storage
        .locations_for(city, category)?
        .into_iter()
        .map(|stored| stored.location)
        .collect())
}
