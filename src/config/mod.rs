//! Configuration module for Tastemap
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use tastemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tastemap.toml")).unwrap();
//! println!("Rankings come from: {}", config.source.ranking_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, OutputConfig, SearchConfig, SourceConfig, UserAgentConfig, DEFAULT_API_KEY_ENV,
    DEFAULT_SEARCH_LIMIT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
