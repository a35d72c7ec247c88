//! Scripted sessions through the interactive shell

use crate::common::{boulder_indian, create_test_config, mount_ranking, mount_search, TOKEN};
use tastemap::search::BusinessSearch;
use tastemap::shell::{run_shell, AppContext, ScriptedInput};
use tastemap::storage::Storage;
use tastemap::Category;
use wiremock::MockServer;

async fn run_session(ctx: &mut AppContext, lines: &[&str]) -> String {
    let cities = ctx.refresh_cities(false).await.unwrap();
    let mut input = ScriptedInput::new(lines.iter().copied());
    let mut out = Vec::new();

    run_shell(ctx, &cities, &mut input, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_full_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;
    mount_search(&server, "Boulder", "Indian", boulder_indian(), 1).await;

    let mut ctx = AppContext::open(config.clone()).unwrap();
    ctx.search = BusinessSearch::with_api_key(ctx.client.clone(), &config.search, TOKEN);

    let output = run_session(
        &mut ctx,
        &[
            "boulder", "4", "1", "average", "3", "prices", "back", "indian", "back", "exit",
        ],
    )
    .await;

    assert!(output.contains("  [1] Boulder, Colorado"));
    assert!(output.contains("Boulder, Colorado (#1)"));
    assert!(output.contains("Indian restaurants in Boulder (3 stored)"));
    assert!(output.contains("  1. Curry House (Indian) - rating 4.5, price $$"));
    assert!(output.contains("  3. Spice Route (Indian) - rating unavailable, price unavailable"));
    assert!(output.contains("Average rating of 2 rated Indian restaurants in Boulder: 3.75"));
    assert!(output.contains("2 rated locations"));
    assert!(output.contains("pricing level 2"));
    assert!(output.ends_with("Bye!\n"));

    // Choosing the pair again reused the stored rows
    assert_eq!(ctx.storage.list_searches().unwrap().len(), 1);
    assert_eq!(ctx.storage.count_locations().unwrap(), 3);
}

#[tokio::test]
async fn test_invalid_input_reprompts() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;

    let mut ctx = AppContext::open(config).unwrap();
    let output = run_session(&mut ctx, &["9", "back", "Ann Arbor", "Mexican", "exit"]).await;

    assert!(output.contains("Please enter a number between 1 and 2"));
    assert!(output.contains("Unknown option 'back'"));
    assert!(output.contains("Ann Arbor, Michigan (#2)"));
    assert!(output.contains("Unknown option 'Mexican'"));
    assert!(output.ends_with("Bye!\n"));
}

#[tokio::test]
async fn test_search_failure_is_reported_and_session_continues() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;

    // No token and no cached response
    let mut ctx = AppContext::open(config).unwrap();
    let output = run_session(&mut ctx, &["1", "chinese", "back", "2", "exit"]).await;

    assert!(output.contains("Could not load Chinese restaurants for Boulder"));
    assert!(output.contains("TASTEMAP_TEST_UNSET_KEY"));
    assert!(output.contains("Ann Arbor, Michigan (#2)"));
    assert!(!ctx.storage.has_search("Boulder", Category::Chinese).unwrap());
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = create_test_config(&server.uri(), dir.path());
    mount_ranking(&server, 1).await;

    let mut ctx = AppContext::open(config).unwrap();
    let output = run_session(&mut ctx, &["1"]).await;

    assert!(output.contains("Boulder, Colorado (#1)"));
    assert!(output.ends_with("Bye!\n"));
}
