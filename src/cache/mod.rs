//! Response cache
//!
//! Maps request fingerprints (and page URLs) to previously fetched responses,
//! persisted as a single JSON file.

mod fingerprint;
mod store;

pub use fingerprint::fingerprint;
pub use store::ResponseCache;

use thiserror::Error;

/// Errors that can occur while persisting the cache
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(serde_json::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
