//! Shared fixtures for the integration tests

use serde_json::json;
use std::path::Path;
use tastemap::config::{Config, OutputConfig, SearchConfig, SourceConfig, UserAgentConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RANKING_PATH: &str = "/best-places-to-live";
pub const SEARCH_PATH: &str = "/v3/businesses/search";
pub const TOKEN: &str = "test-token";

pub const RANKING_HTML: &str = r#"<html><body>
<div class="slide-layout clearfix">
  <h2 class="slide-title-text">1. Boulder, Colorado</h2>
  <p>Mountains on one side, plains on the other.</p>
</div>
<div class="slide-layout clearfix">
  <h2 class="slide-title-text">2. Ann Arbor, Michigan</h2>
  <p>A college town with a big-city food scene.</p>
</div>
</body></html>"#;

/// Creates a test configuration pointing at the mock server
pub fn create_test_config(base_url: &str, dir: &Path) -> Config {
    Config {
        user_agent: UserAgentConfig {
            name: "TastemapTest".to_string(),
            version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        source: SourceConfig {
            ranking_url: format!("{}{}", base_url, RANKING_PATH),
        },
        search: SearchConfig {
            endpoint: format!("{}{}", base_url, SEARCH_PATH),
            api_key_env: "TASTEMAP_TEST_UNSET_KEY".to_string(),
            limit: 50,
        },
        output: OutputConfig {
            database_path: dir.join("tastemap.db").to_string_lossy().into_owned(),
            cache_path: dir.join("cache.json").to_string_lossy().into_owned(),
            summary_path: dir.join("summary.md").to_string_lossy().into_owned(),
        },
    }
}

/// Three Indian restaurants in Boulder; the last has neither rating nor price
pub fn boulder_indian() -> serde_json::Value {
    json!({
        "businesses": [
            {
                "name": "Curry House",
                "rating": 4.5,
                "price": "$$",
                "display_phone": "(303) 555-0100",
                "location": {"display_address": ["1 Pearl St", "Boulder, CO 80302"]}
            },
            {
                "name": "Tandoor",
                "rating": 3.0,
                "price": "$",
                "location": {"address1": "2 Walnut St"}
            },
            {
                "name": "Spice Route",
                "location": {}
            }
        ]
    })
}

/// Mounts the ranking page, expected to be fetched `times` times
pub async fn mount_ranking(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path(RANKING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(RANKING_HTML)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts an authenticated search for one (city, term), expected `times` times
pub async fn mount_search(
    server: &MockServer,
    city: &str,
    term: &str,
    body: serde_json::Value,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("location", city))
        .and(query_param("term", term))
        .and(query_param("limit", "50"))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}
