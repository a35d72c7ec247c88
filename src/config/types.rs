use serde::Deserialize;

/// Default environment variable holding the search API bearer token
pub const DEFAULT_API_KEY_ENV: &str = "YELP_API_KEY";

/// Default (and maximum) number of businesses requested per search
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Main configuration structure for Tastemap
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub source: SourceConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name sent in the User-Agent header
    pub name: String,

    /// Version sent in the User-Agent header
    pub version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Where the city rankings come from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Page listing the ranked cities
    #[serde(rename = "ranking-url")]
    pub ranking_url: String,
}

/// Business search API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint, e.g. `https://api.yelp.com/v3/businesses/search`
    pub endpoint: String,

    /// Name of the environment variable holding the bearer token
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Number of businesses requested per search
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the JSON response cache
    #[serde(rename = "cache-path")]
    pub cache_path: String,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

fn default_summary_path() -> String {
    "tastemap-summary.md".to_string()
}
