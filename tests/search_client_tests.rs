//! Integration Tests for the Search Client
//!
//! Runs the client against a local axum server standing in for the token
//! endpoint and the game database.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Form, Json, Router,
};
use game_catalog::{
    cache::{CacheStore, SharedCache},
    search::{SearchClient, SearchConfig},
    CatalogError,
};
use serde_json::json;

// == Mock Upstream ==

#[derive(Default)]
struct Upstream {
    expires_in: u64,
    token_calls: AtomicUsize,
    search_calls: AtomicUsize,
    last_search: Mutex<Option<(HeaderMap, String)>>,
}

async fn token(
    State(upstream): State<Arc<Upstream>>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let n = upstream.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    if form.get("grant_type").map(String::as_str) != Some("client_credentials")
        || form.get("client_id").map(String::as_str) != Some("client")
        || form.get("client_secret").map(String::as_str) != Some("secret")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad form"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "access_token": format!("token-{}", n),
            "expires_in": upstream.expires_in,
            "token_type": "bearer"
        })),
    )
}

async fn token_denied(State(upstream): State<Arc<Upstream>>) -> impl IntoResponse {
    upstream.token_calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::UNAUTHORIZED, "invalid client")
}

async fn token_garbage(State(upstream): State<Arc<Upstream>>) -> impl IntoResponse {
    upstream.token_calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::OK, "not json")
}

async fn games(
    State(upstream): State<Arc<Upstream>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    upstream.search_calls.fetch_add(1, Ordering::SeqCst);
    *upstream.last_search.lock().unwrap() = Some((headers, body));
    Json(json!([
        {
            "id": 1942,
            "name": "The Witcher 3: Wild Hunt",
            "first_release_date": 1431993600,
            "platforms": [{"id": 6, "name": "PC (Microsoft Windows)"}, {"id": 48, "name": "PlayStation 4"}],
            "genres": [{"id": 12, "name": "Role-playing (RPG)"}]
        },
        { "id": 7, "name": "Untitled" }
    ]))
}

async fn games_fail(State(upstream): State<Arc<Upstream>>) -> impl IntoResponse {
    upstream.search_calls.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn games_slow(State(upstream): State<Arc<Upstream>>) -> impl IntoResponse {
    upstream.search_calls.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!([]))
}

async fn spawn_upstream(expires_in: u64) -> (SocketAddr, Arc<Upstream>) {
    let upstream = Arc::new(Upstream {
        expires_in,
        ..Upstream::default()
    });
    let app = Router::new()
        .route("/token", post(token))
        .route("/token-denied", post(token_denied))
        .route("/token-garbage", post(token_garbage))
        .route("/games", post(games))
        .route("/games-fail", post(games_fail))
        .route("/games-slow", post(games_slow))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, upstream)
}

fn client(addr: SocketAddr, token_path: &str, games_path: &str) -> SearchClient {
    let config = SearchConfig {
        client_id: Some("client".to_string()),
        client_secret: Some("secret".to_string()),
        token_url: format!("http://{}{}", addr, token_path),
        api_url: format!("http://{}{}", addr, games_path),
        timeout_secs: 1,
        result_ttl: 60,
    };
    SearchClient::new(config, SharedCache::new(CacheStore::new(100, 300))).unwrap()
}

// == Token Lifecycle ==

#[tokio::test]
async fn test_token_fetched_once_while_valid() {
    let (addr, upstream) = spawn_upstream(3600).await;
    let client = client(addr, "/token", "/games");

    let first = client.get_token().await.unwrap();
    let second = client.get_token().await.unwrap();

    assert_eq!(first, "token-1");
    assert_eq!(second, "token-1");
    assert_eq!(upstream.token_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_token_refetched_after_expiry() {
    let (addr, upstream) = spawn_upstream(1).await;
    let client = client(addr, "/token", "/games");

    client.get_token().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let refreshed = client.get_token().await.unwrap();

    assert_eq!(refreshed, "token-2");
    assert_eq!(upstream.token_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_exchange() {
    let (addr, upstream) = spawn_upstream(3600).await;
    let client = Arc::new(client(addr, "/token", "/games"));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get_token().await })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), "token-1");
    }

    assert_eq!(upstream.token_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_clear_token_forces_reauthentication() {
    let (addr, upstream) = spawn_upstream(3600).await;
    let client = client(addr, "/token", "/games");

    client.get_token().await.unwrap();
    client.clear_token().await;
    assert_eq!(client.get_token().await.unwrap(), "token-2");
    assert_eq!(upstream.token_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rejected_credentials_is_auth_error() {
    let (addr, upstream) = spawn_upstream(3600).await;
    let client = client(addr, "/token-denied", "/games");

    let err = client.get_token().await.unwrap_err();
    assert!(matches!(err, CatalogError::Auth(_)), "{:?}", err);

    // Failures are not retried internally, and not remembered either
    client.get_token().await.unwrap_err();
    assert_eq!(upstream.token_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_malformed_token_body_is_auth_error() {
    let (addr, _) = spawn_upstream(3600).await;
    let client = client(addr, "/token-garbage", "/games");

    assert!(matches!(client.get_token().await, Err(CatalogError::Auth(_))));
}

// == Search ==

#[tokio::test]
async fn test_search_sends_query_and_maps_results() {
    let (addr, upstream) = spawn_upstream(3600).await;
    let client = client(addr, "/token", "/games");

    let results = client.search_games(r#"The "Witcher""#).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "The Witcher 3: Wild Hunt");
    assert_eq!(results[0].first_release_date, Some(1431993600));
    assert_eq!(results[0].release_date.as_deref(), Some("2015-05-19"));
    assert_eq!(results[0].platforms.len(), 2);
    assert_eq!(results[0].genres, vec!["Role-playing (RPG)".to_string()]);
    assert!(results[1].platforms.is_empty());
    assert!(results[1].first_release_date.is_none());

    let (headers, body) = upstream.last_search.lock().unwrap().clone().unwrap();
    assert_eq!(headers["client-id"], "client");
    assert_eq!(headers["authorization"], "Bearer token-1");
    assert_eq!(
        body,
        r#"search "The \"Witcher\""; fields name, first_release_date, platforms.name, genres.name; limit 10;"#
    );
}

#[tokio::test]
async fn test_repeated_search_served_from_cache() {
    let (addr, upstream) = spawn_upstream(3600).await;
    let client = client(addr, "/token", "/games");

    client.search_games("witcher").await.unwrap();
    client.search_games("  Witcher ").await.unwrap();

    assert_eq!(upstream.search_calls.load(Ordering::SeqCst), 1);
    assert_eq!(upstream.token_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_search_failure_propagates_and_is_not_cached() {
    let (addr, upstream) = spawn_upstream(3600).await;
    let client = client(addr, "/token", "/games-fail");

    for _ in 0..2 {
        let err = client.search_games("witcher").await.unwrap_err();
        assert!(
            matches!(err, CatalogError::Remote { status: Some(500), .. }),
            "{:?}",
            err
        );
    }
    assert_eq!(upstream.search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_slow_search_times_out() {
    let (addr, _) = spawn_upstream(3600).await;
    let client = client(addr, "/token", "/games-slow");

    let err = client.search_games("witcher").await.unwrap_err();
    assert!(matches!(err, CatalogError::Timeout(_)), "{:?}", err);
}

#[tokio::test]
async fn test_empty_query_makes_no_calls() {
    let (addr, upstream) = spawn_upstream(3600).await;
    let client = client(addr, "/token", "/games");

    let err = client.search_games("").await.unwrap_err();

    assert!(matches!(err, CatalogError::Validation(_)));
    assert_eq!(upstream.token_calls.load(Ordering::SeqCst), 0);
    assert_eq!(upstream.search_calls.load(Ordering::SeqCst), 0);
}
