//! Price tier breakdown

use crate::search::{Location, UNAVAILABLE};
use std::collections::HashMap;

/// One slice of the price breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct PriceShare {
    pub label: String,
    pub count: usize,
}

impl PriceShare {
    /// Share of `total` as a percentage
    pub fn percentage(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.count as f64 / total as f64 * 100.0
    }
}

/// Relabels a dollar-coded tier: `"$$$"` becomes `"pricing level 3"`
///
/// Labels not made only of `$` pass through unchanged.
pub fn relabel_price(label: &str) -> String {
    if !label.is_empty() && label.chars().all(|c| c == '$') {
        format!("pricing level {}", label.len())
    } else {
        label.to_string()
    }
}

/// Counts locations per relabeled price tier
///
/// Missing prices are counted under `"unavailable"`. Shares are sorted by count
/// (descending), then by label.
pub fn price_breakdown(locations: &[Location]) -> Vec<PriceShare> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for location in locations {
        let raw = location.price.as_deref().unwrap_or(UNAVAILABLE);
        *counts.entry(relabel_price(raw)).or_insert(0) += 1;
    }

    let mut shares: Vec<PriceShare> = counts
        .into_iter()
        .map(|(label, count)| PriceShare { label, count })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price: Option<&str>) -> Location {
        Location {
            name: "Spot".to_string(),
            city: "Denver".to_string(),
            address: None,
            categories: "Chinese".to_string(),
            rating: Some(4.0),
            price: price.map(str::to_string),
            phone: None,
        }
    }

    #[test]
    fn test_relabel_dollar_tiers() {
        assert_eq!(relabel_price("$"), "pricing level 1");
        assert_eq!(relabel_price("$$$"), "pricing level 3");
        assert_eq!(relabel_price("$$$$"), "pricing level 4");
    }

    #[test]
    fn test_relabel_passes_other_labels_through() {
        assert_eq!(relabel_price("unavailable"), "unavailable");
        assert_eq!(relabel_price("€€"), "€€");
        assert_eq!(relabel_price("$5"), "$5");
        assert_eq!(relabel_price(""), "");
    }

    #[test]
    fn test_price_breakdown_counts() {
        let locations = vec![
            priced(Some("$$")),
            priced(Some("$")),
            priced(Some("$$")),
            priced(None),
        ];

        let shares = price_breakdown(&locations);
        assert_eq!(
            shares,
            vec![
                PriceShare {
                    label: "pricing level 2".to_string(),
                    count: 2
                },
                PriceShare {
                    label: "pricing level 1".to_string(),
                    count: 1
                },
                PriceShare {
                    label: "unavailable".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(shares[0].percentage(4), 50.0);
    }

    #[test]
    fn test_price_breakdown_empty() {
        assert!(price_breakdown(&[]).is_empty());
        let share = PriceShare {
            label: "x".to_string(),
            count: 0,
        };
        assert_eq!(share.percentage(0), 0.0);
    }
}
