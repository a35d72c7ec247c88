//! Markdown summary generation
//!
//! This module generates a human-readable markdown report of the stored
//! searches: for each (city, category) pair, its average rating, top-rated
//! locations and price breakdown.

use crate::analysis::{average_rating, price_breakdown, top_rated, PriceShare, TOP_N};
use crate::output::OutputResult;
use crate::search::{Category, Location};
use crate::storage::Storage;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Aggregated view of one stored search
#[derive(Debug, Clone)]
pub struct SearchSummary {
    pub city: String,
    pub category: Category,
    pub locations: Vec<Location>,
}

/// Reads every persisted search back from storage
pub fn collect_summaries(storage: &dyn Storage) -> OutputResult<Vec<SearchSummary>> {
    let mut summaries = Vec::new();

    for search in storage.list_searches()? {
        let category = match search.category.parse::<Category>() {
            Ok(category) => category,
            Err(e) => {
                tracing::warn!("Skipping stored search {}: {}", search.city, e);
                continue;
            }
        };

        let locations = crate::analysis::load_locations(storage, &search.city, category)?;
        summaries.push(SearchSummary {
            city: search.city,
            category,
            locations,
        });
    }

    Ok(summaries)
}

/// Writes the markdown summary of every stored search to `output_path`
pub fn generate_markdown_summary(storage: &dyn Storage, output_path: &Path) -> OutputResult<()> {
    let summaries = collect_summaries(storage)?;
    let markdown = format_markdown_summary(&summaries);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!(
        "Wrote summary of {} searches to {}",
        summaries.len(),
        output_path.display()
    );
    Ok(())
}

/// Formats search summaries as markdown
pub fn format_markdown_summary(summaries: &[SearchSummary]) -> String {
    let mut md = String::new();

    md.push_str("# Tastemap Summary\n\n");

    if summaries.is_empty() {
        md.push_str("No searches have been stored yet.\n");
        return md;
    }

    md.push_str(&format!("- **Searches**: {}\n", summaries.len()));
    md.push_str(&format!(
        "- **Locations**: {}\n\n",
        summaries.iter().map(|s| s.locations.len()).sum::<usize>()
    ));

    for summary in summaries {
        md.push_str(&format!("## {} - {}\n\n", summary.city, summary.category));

        match average_rating(&summary.locations) {
            Some(average) => md.push_str(&format!("- **Average rating**: {:.2}\n", average)),
            None => md.push_str("- **Average rating**: no data\n"),
        }
        md.push_str(&format!("- **Locations**: {}\n\n", summary.locations.len()));

        let top = top_rated(&summary.locations, TOP_N);
        if !top.is_empty() {
            md.push_str(&format!("### Top {}\n\n", TOP_N));
            md.push_str("| # | Name | Rating | Price | Address |\n");
            md.push_str("|---|------|--------|-------|---------|\n");
            for (i, location) in top.iter().enumerate() {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    i + 1,
                    escape_cell(&location.name),
                    location.rating_label(),
                    escape_cell(location.price_label()),
                    escape_cell(location.address_label())
                ));
            }
            md.push('\n');
        }

        let shares = price_breakdown(&summary.locations);
        if !shares.is_empty() {
            md.push_str("### Prices\n\n");
            md.push_str(&format_price_table(&shares, summary.locations.len()));
            md.push('\n');
        }
    }

    md
}

fn format_price_table(shares: &[PriceShare], total: usize) -> String {
    let mut table = String::from("| Price | Count | Share |\n|-------|-------|-------|\n");
    for share in shares {
        table.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            escape_cell(&share.label),
            share.count,
            share.percentage(total)
        ));
    }
    table
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
