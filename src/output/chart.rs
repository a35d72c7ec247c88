//! Terminal charts for ratings and prices

use crate::analysis::{PriceShare, RatingHistogram};
use crate::search::Location;

/// Width of the longest bar, in characters
const BAR_WIDTH: usize = 40;

const BAR_CHAR: char = '█';

/// Renders a rating histogram, one line per half-star bucket
///
/// ```text
/// 4.0-4.5 | ████████████ 3
/// ```
pub fn render_histogram(histogram: &RatingHistogram) -> String {
    let max = histogram.max_count();
    let mut out = String::new();

    for (lower, count) in &histogram.buckets {
        out.push_str(&format!(
            "  {:.1}-{:.1} | {} {}\n",
            lower,
            lower + RatingHistogram::STEP,
            bar(*count, max),
            count
        ));
    }

    out.push_str(&format!("  {} rated locations\n", histogram.total()));
    out
}

/// Renders the price breakdown as labelled bars with their share of the total
pub fn render_price_chart(shares: &[PriceShare]) -> String {
    let total: usize = shares.iter().map(|share| share.count).sum();
    let max = shares.iter().map(|share| share.count).max().unwrap_or(0);
    let label_width = shares
        .iter()
        .map(|share| share.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for share in shares {
        out.push_str(&format!(
            "  {:<width$} | {} {} ({:.1}%)\n",
            share.label,
            bar(share.count, max),
            share.count,
            share.percentage(total),
            width = label_width
        ));
    }
    out
}

/// Renders a numbered table of locations
pub fn render_location_table(locations: &[&Location]) -> String {
    let mut out = String::new();
    for (i, location) in locations.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} ({}) - rating {}, price {}\n     {} | {}\n",
            i + 1,
            location.name,
            location.categories,
            location.rating_label(),
            location.price_label(),
            location.address_label(),
            location.phone_label()
        ));
    }
    out
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH + max - 1) / max;
    BAR_CHAR.to_string().repeat(len)
}
