//! End-to-end tests of scraping, searching, caching and storing

use crate::common::{
    boulder_indian, create_test_config, mount_ranking, mount_search, SEARCH_PATH, TOKEN,
};
use tastemap::fetch::FetchError;
use tastemap::output::generate_markdown_summary;
use tastemap::search::{BusinessSearch, SearchError};
use tastemap::shell::AppContext;
use tastemap::storage::{LocationColumn, Storage};
use tastemap::{Category, Config, ResponseCache, TastemapError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Opens a context whose search client carries the test token
fn open_with_token(config: &Config) -> AppContext {
    let mut ctx = AppContext::open(config.clone()).expect("Failed to open context");
    ctx.search = BusinessSearch::with_api_key(ctx.client.clone(), &config.search, TOKEN);
    ctx
}

#[tokio::test]
async fn test_rankings_are_scraped_once_and_stored() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;

    let mut ctx = open_with_token(&config);
    let cities = ctx.refresh_cities(false).await.unwrap();
    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0].name, "Boulder");
    assert_eq!(cities[1].state, "Michigan");
    drop(ctx);

    // A second session reads the page from the cache file
    let mut ctx = open_with_token(&config);
    let cached = ctx.refresh_cities(false).await.unwrap();
    assert_eq!(cached, cities);

    let stored = ctx.storage.list_cities().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].name, "Ann Arbor");
    assert_eq!(
        stored[0].description,
        "Mountains on one side, plains on the other."
    );
}

#[tokio::test]
async fn test_refresh_bypasses_cached_rankings() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 2).await;

    let mut ctx = open_with_token(&config);
    ctx.refresh_cities(false).await.unwrap();
    ctx.refresh_cities(true).await.unwrap();
    ctx.refresh_cities(false).await.unwrap();

    // Upserts keyed by rank never duplicate cities
    assert_eq!(ctx.storage.count_cities().unwrap(), 2);
}

#[tokio::test]
async fn test_search_is_stored_once_with_sentinels() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;
    mount_search(&server, "Boulder", "Indian", boulder_indian(), 1).await;

    let mut ctx = open_with_token(&config);
    ctx.refresh_cities(false).await.unwrap();

    let first = ctx.ensure_locations("Boulder", Category::Indian).await.unwrap();
    let second = ctx.ensure_locations("Boulder", Category::Indian).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert_eq!(ctx.storage.count_locations().unwrap(), 3);

    assert_eq!(
        first[0].address.as_deref(),
        Some("1 Pearl St, Boulder, CO 80302")
    );
    assert_eq!(first[1].address.as_deref(), Some("2 Walnut St"));
    assert_eq!(first[2].rating, None);
    assert_eq!(first[2].price, None);
    assert_eq!(first[2].price_label(), "unavailable");

    let stored = ctx.storage.locations_for("Boulder", Category::Indian).unwrap();
    let boulder_id = ctx.storage.city_id("Boulder").unwrap();
    assert!(stored.iter().all(|row| row.city_id == boulder_id));

    let searches = ctx.storage.list_searches().unwrap();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].category, "Indian");
    assert_eq!(searches[0].location_count, 3);
}

#[tokio::test]
async fn test_cached_search_needs_no_api_key() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;
    mount_search(&server, "Boulder", "Indian", boulder_indian(), 1).await;

    let mut ctx = open_with_token(&config);
    ctx.refresh_cities(false).await.unwrap();
    ctx.ensure_locations("Boulder", Category::Indian).await.unwrap();
    drop(ctx);

    // Fresh database, same cache file, no token in the environment
    let mut fresh = config.clone();
    fresh.output.database_path = dir.path().join("second.db").to_string_lossy().into_owned();

    let mut ctx = AppContext::open(fresh).unwrap();
    ctx.refresh_cities(false).await.unwrap();
    let locations = ctx.ensure_locations("Boulder", Category::Indian).await.unwrap();
    assert_eq!(locations.len(), 3);

    // A pair that was never fetched cannot be searched without a token
    let result = ctx.ensure_locations("Ann Arbor", Category::Chinese).await;
    match result {
        Err(TastemapError::Fetch(FetchError::MissingApiKey(name))) => {
            assert_eq!(name, "TASTEMAP_TEST_UNSET_KEY");
        }
        other => panic!("Expected a missing API key error, got {:?}", other),
    }
    assert!(!ctx.storage.has_search("Ann Arbor", Category::Chinese).unwrap());
}

#[tokio::test]
async fn test_api_error_is_neither_cached_nor_stored() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": "LOCATION_NOT_FOUND",
                "description": "Could not execute search, try specifying a more exact location."
            }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut ctx = open_with_token(&config);
    ctx.refresh_cities(false).await.unwrap();
    let cached_entries = ctx.cache.len();

    for _ in 0..2 {
        let result = ctx.ensure_locations("Boulder", Category::British).await;
        match result {
            Err(TastemapError::Fetch(FetchError::Status { status, detail, .. })) => {
                assert_eq!(status, 400);
                assert!(detail.contains("more exact location"));
            }
            other => panic!("Expected a status error, got {:?}", other),
        }
    }

    assert_eq!(ctx.cache.len(), cached_entries);
    assert!(!ctx.storage.has_search("Boulder", Category::British).unwrap());
    assert_eq!(ctx.storage.count_locations().unwrap(), 0);

    let reloaded = ResponseCache::load(&config.output.cache_path);
    assert_eq!(reloaded.len(), cached_entries);
}

#[tokio::test]
async fn test_query_and_summary_over_stored_search() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;
    mount_search(&server, "Boulder", "Indian", boulder_indian(), 1).await;

    let mut ctx = open_with_token(&config);
    ctx.refresh_cities(false).await.unwrap();
    ctx.ensure_locations("Boulder", Category::Indian).await.unwrap();

    let rows = ctx
        .storage
        .query(
            &[LocationColumn::Name, LocationColumn::Rating],
            &[(
                LocationColumn::City,
                rusqlite::types::Value::Text("Boulder".to_string()),
            )],
        )
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 2);

    let summary_path = std::path::Path::new(&config.output.summary_path);
    generate_markdown_summary(&ctx.storage, summary_path).unwrap();

    let markdown = std::fs::read_to_string(summary_path).unwrap();
    assert!(markdown.contains("## Boulder - Indian"));
    assert!(markdown.contains("- **Average rating**: 3.75"));
    assert!(markdown.contains("| 1 | Curry House | 4.5 | $$ |"));
    assert!(markdown.contains("| 3 | Spice Route | unavailable | unavailable | unavailable |"));
}

#[tokio::test]
async fn test_unmappable_response_is_not_cached() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;
    mount_search(
        &server,
        "Boulder",
        "American",
        serde_json::json!({"total": 0}),
        2,
    )
    .await;

    let mut ctx = open_with_token(&config);
    ctx.refresh_cities(false).await.unwrap();
    let cached_entries = ctx.cache.len();

    // Each attempt reaches the API again instead of replaying a bad entry
    for _ in 0..2 {
        let result = ctx.ensure_locations("Boulder", Category::American).await;
        assert!(matches!(
            result,
            Err(TastemapError::Search(SearchError::MissingBusinesses))
        ));
    }

    assert_eq!(ctx.cache.len(), cached_entries);
    assert!(!ctx.storage.has_search("Boulder", Category::American).unwrap());
}
