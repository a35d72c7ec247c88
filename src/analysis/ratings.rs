//! Rating aggregations
//!
//! Unavailable ratings (`None`) are never treated as zero: they rank last and
//! are left out of averages and distributions.

use crate::search::Location;
use std::cmp::Ordering;

/// Number of rows shown by the "top rated" view
pub const TOP_N: usize = 3;

/// Returns the `n` best-rated locations, unavailable ratings last
///
/// The sort is stable, so equally rated locations keep their stored order.
pub fn top_rated(locations: &[Location], n: usize) -> Vec<&Location> {
    let mut sorted: Vec<&Location> = locations.iter().collect();
    sorted.sort_by(|a, b| compare_ratings_desc(a.rating, b.rating));
    sorted.truncate(n);
    sorted
}

fn compare_ratings_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Mean of the available ratings, `None` when no location has one
pub fn average_rating(locations: &[Location]) -> Option<f64> {
    let ratings = rating_distribution(locations);
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}

/// The available ratings in stored order, ready for plotting
pub fn rating_distribution(locations: &[Location]) -> Vec<f64> {
    locations.iter().filter_map(|location| location.rating).collect()
}

/// Half-star histogram of ratings between 1.0 and 5.0
#[derive(Debug, Clone, PartialEq)]
pub struct RatingHistogram {
    /// `(lower bound, count)` per bucket, ascending
    pub buckets: Vec<(f64, usize)>,
}

impl RatingHistogram {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;
    pub const STEP: f64 = 0.5;

    /// Bins ratings into half-star buckets
    ///
    /// Each bucket covers `[lower, lower + 0.5)`, except the last, which also
    /// takes 5.0. Ratings outside 1.0..=5.0 are clamped into the end buckets.
    pub fn from_ratings(ratings: &[f64]) -> Self {
        let bucket_count = ((Self::MAX - Self::MIN) / Self::STEP) as usize;
        let mut buckets: Vec<(f64, usize)> = (0..bucket_count)
            .map(|i| (Self::MIN + i as f64 * Self::STEP, 0))
            .collect();

        for rating in ratings {
            let offset = ((rating - Self::MIN) / Self::STEP).floor();
            let index = (offset.max(0.0) as usize).min(bucket_count - 1);
            buckets[index].1 += 1;
        }

        Self { buckets }
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, count)| count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }
}
