//! Output module for charts, statistics and reports
//!
//! This module handles:
//! - Rendering rating histograms and price charts for the terminal
//! - Printing store statistics
//! - Exporting a markdown summary of stored searches

mod chart;
mod markdown;
pub mod stats;

pub use chart::{render_histogram, render_location_table, render_price_chart};
pub use markdown::{
    collect_summaries, format_markdown_summary, generate_markdown_summary, SearchSummary,
};
pub use stats::{load_statistics, print_statistics, StoreStatistics};

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
