use letterboard_model::Tile;
use letterboard_repo::TileRepository;
use letterboard_service::{routes, BoardService};
use letterboard_store::MemoryStore;
use letterboard_test_utils::{board_fixture, three_tiles};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

async fn fixture_service() -> Arc<BoardService<MemoryStore>> {
    let repo = TileRepository::new(Arc::new(MemoryStore::new()));
    repo.set_board(&board_fixture()).await.unwrap();
    repo.set_all(&three_tiles()).await.unwrap();
    Arc::new(BoardService::new(repo))
}

#[tokio::test]
async fn liveness_says_hi() {
    let api = routes(fixture_service().await);
    let res = warp::test::request().method("GET").path("/").reply(&api).await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.body().as_ref(), b"\"Hi!\"");
}

#[tokio::test]
async fn get_board_returns_style_json() {
    let api = routes(fixture_service().await);
    let res = warp::test::request().method("GET").path("/board").reply(&api).await;
    assert_eq!(res.status(), 200);

    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body, serde_json::to_value(board_fixture()).unwrap());
}

#[tokio::test]
async fn get_letters_returns_full_collection() {
    let api = routes(fixture_service().await);
    let res = warp::test::request().method("GET").path("/letters").reply(&api).await;
    assert_eq!(res.status(), 200);

    let body: Vec<Tile> = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body, three_tiles());
}

#[tokio::test]
async fn get_letter_by_index() {
    let api = routes(fixture_service().await);
    let res = warp::test::request().method("GET").path("/letters/1").reply(&api).await;
    assert_eq!(res.status(), 200);

    let body: Tile = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body, three_tiles()[1]);
}

#[tokio::test]
async fn get_letter_out_of_range_is_404() {
    let api = routes(fixture_service().await);
    let res = warp::test::request().method("GET").path("/letters/9").reply(&api).await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn get_letter_non_integer_index_is_400() {
    let api = routes(fixture_service().await);
    let res = warp::test::request().method("GET").path("/letters/abc").reply(&api).await;
    assert_eq!(res.status(), 400);

    let res = warp::test::request().method("GET").path("/letters/-1").reply(&api).await;
    assert_eq!(res.status(), 400);
}

// The end-to-end update scenario: the four protocol fields land exactly as
// sent, everything else survives from the seeded state.
#[tokio::test]
async fn put_letter_updates_position_and_transform_only() {
    let service = fixture_service().await;
    let api = routes(Arc::clone(&service));

    let mut proposal = three_tiles()[0].clone();
    proposal.style.set_position("15em", "15em");
    proposal
        .style
        .set_transform("matrix(0.99942, 0.0340418, -0.0340418, 0.99942, 0, 0)", "19.5469px 16px");

    let res = warp::test::request()
        .method("PUT")
        .path("/letters/0")
        .json(&proposal)
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);

    let returned: Tile = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(returned, proposal);

    let res = warp::test::request().method("GET").path("/letters/0").reply(&api).await;
    let stored: Tile = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(stored.id, 0);
    assert_eq!(stored.value, 'A');
    assert_eq!(stored.style.left.as_deref(), Some("15em"));
    assert_eq!(stored.style.top.as_deref(), Some("15em"));
    assert_eq!(
        stored.style.transform.as_deref(),
        Some("matrix(0.99942, 0.0340418, -0.0340418, 0.99942, 0, 0)")
    );
    assert_eq!(stored.style.transform_origin.as_deref(), Some("19.5469px 16px"));
    // Creation-time fields are preserved, never taken from the proposal.
    assert_eq!(stored.style.color.as_deref(), Some("blue"));
    assert_eq!(stored.style.font_size.as_deref(), Some("2em"));
}

#[tokio::test]
async fn put_ignores_proposed_creation_time_fields() {
    let service = fixture_service().await;
    let api = routes(Arc::clone(&service));

    let mut proposal = three_tiles()[2].clone();
    proposal.style.set_position("3em", "3em");
    proposal.style.set_transform("none", "0 0");
    // A client trying to smuggle a color change through the update path.
    proposal.style.color = Some("black".into());

    let res = warp::test::request()
        .method("PUT")
        .path("/letters/2")
        .json(&proposal)
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);

    let stored: Tile = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(stored.style.color.as_deref(), Some("yellow"));
}

#[tokio::test]
async fn put_without_required_fields_is_400_and_writes_nothing() {
    let service = fixture_service().await;
    let api = routes(Arc::clone(&service));

    // Position set, transform fields missing.
    let mut proposal = three_tiles()[0].clone();
    proposal.style.set_position("15em", "15em");

    let res = warp::test::request()
        .method("PUT")
        .path("/letters/0")
        .json(&proposal)
        .reply(&api)
        .await;
    assert_eq!(res.status(), 400);

    // Fail fast means no partial mutation.
    let stored = service.tile(0).await.unwrap();
    assert_eq!(stored, three_tiles()[0]);
}

#[tokio::test]
async fn put_out_of_range_is_404() {
    let api = routes(fixture_service().await);
    let mut proposal = three_tiles()[0].clone();
    proposal.style.set_position("1em", "1em");
    proposal.style.set_transform("none", "0 0");

    let res = warp::test::request()
        .method("PUT")
        .path("/letters/99")
        .json(&proposal)
        .reply(&api)
        .await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn put_with_malformed_body_is_400() {
    let api = routes(fixture_service().await);

    // Multi-character value fails deserialization.
    let res = warp::test::request()
        .method("PUT")
        .path("/letters/0")
        .json(&json!({"id": 0, "value": "AB", "style": {}}))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let api = routes(fixture_service().await);
    let res = warp::test::request().method("GET").path("/nope").reply(&api).await;
    assert_eq!(res.status(), 404);
}
