//! End-to-end tests for the HTTP card source against a fake `/api/cards`
//! backend served by axum on an ephemeral port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use card_viewer::config::ApiConfig;
use card_viewer::controller::{Controller, Phase};
use card_viewer::error::ViewerError;
use card_viewer::http::HttpCardSource;
use card_viewer_core::source::{CardSource, LoadError};
use card_viewer_core::surface::memory::MemorySurface;
use card_viewer_core::surface::EMPTY_STATUS;
use serde_json::{json, Value};

// ─── Helpers ────────────────────────────────────────────────────────

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn json_route(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/api/cards",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..Default::default()
    }
}

fn controller(base_url: &str) -> Controller<MemorySurface> {
    let source = HttpCardSource::new(&api_config(base_url)).unwrap();
    Controller::new(Arc::new(source), MemorySurface::new(), Duration::from_millis(120))
}

// ─── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_loads_and_normalizes_both_conventions() {
    let base = serve(json_route(
        StatusCode::OK,
        json!({
            "success": true,
            "cards": [
                {"claim": "Camel card", "thenStart": "2024-01", "issueTitle": "Daily"},
                {"claim": "Snake card", "then_start": "2023-05", "beehiiv_id": "p1"}
            ]
        }),
    ))
    .await;

    let mut c = controller(&base);
    assert_eq!(c.start().await.unwrap(), 2);
    assert_eq!(c.phase(), &Phase::Ready);
    assert_eq!(c.surface().claims(), vec!["Camel card", "Snake card"]);
    assert_eq!(c.surface().status(), "Showing 2 cards");

    let all = c.state().unwrap().all();
    assert_eq!(all[1].issue_title, "Issue p1");
    assert_eq!(all[1].then_start.as_deref(), Some("2023-05"));
}

#[tokio::test]
async fn test_empty_collection() {
    let base = serve(json_route(StatusCode::OK, json!({"success": true, "cards": []}))).await;

    let mut c = controller(&base);
    assert_eq!(c.start().await.unwrap(), 0);
    assert_eq!(c.surface().status(), EMPTY_STATUS);
    assert!(c.surface().cards().is_empty());
}

#[tokio::test]
async fn test_server_error_message_surfaces_despite_500() {
    let base = serve(json_route(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"success": false, "error": "db down"}),
    ))
    .await;

    let mut c = controller(&base);
    assert!(c.start().await.is_err());
    assert_eq!(c.surface().status(), "Error: db down");
    assert!(c.surface().cards().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_parse_failure() {
    let router = Router::new().route(
        "/api/cards",
        get(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
    );
    let base = serve(router).await;

    let source = HttpCardSource::new(&api_config(&base)).unwrap();
    let err = source.fetch_cards().await.unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_backend_is_fetch_failure() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut c = controller(&format!("http://127.0.0.1:{}", port));
    let err = c.start().await.unwrap_err();
    assert!(
        matches!(err, ViewerError::Load(LoadError::Fetch(_))),
        "got {:?}",
        err
    );
    assert!(c.surface().status().starts_with("Error: "));
    assert!(matches!(c.phase(), Phase::Error(_)));
}

#[tokio::test]
async fn test_fetches_exactly_once() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/cards",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({
                    "success": true,
                    "cards": [
                        {"claim": "The sky is blue", "tags": ["weather"]},
                        {"claim": "Grass is green", "tags": ["nature"]}
                    ]
                }))
            }
        }),
    );
    let base = serve(router).await;

    let mut c = controller(&base);
    c.start().await.unwrap();
    c.apply_query("sky").unwrap();
    c.apply_query("").unwrap();
    c.start().await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(c.surface().cards().len(), 2);
}

#[tokio::test]
async fn test_custom_cards_path() {
    let router = Router::new().route(
        "/v2/cards",
        get(|| async { Json(json!({"success": true, "cards": [{"claim": "moved"}]})) }),
    );
    let base = serve(router).await;

    let config = ApiConfig {
        base_url: format!("{}/", base),
        cards_path: "v2/cards".to_string(),
        timeout_secs: 5,
    };
    let source = HttpCardSource::new(&config).unwrap();
    assert_eq!(source.url(), format!("{}/v2/cards", base));
    assert_eq!(source.fetch_cards().await.unwrap().len(), 1);
}
