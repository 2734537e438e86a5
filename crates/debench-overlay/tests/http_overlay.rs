#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! Overlay middleware integration: the fragment lands in HTML responses
//! only, and pass-through responses stay untouched.

use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::Extension;
use axum::http::{header, Request, StatusCode};
use axum::response::{Html, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use tower::ServiceExt;

use debench_overlay::config::OverlayConfig;
use debench_overlay::http::{attach_overlay, OverlayHandle};

fn test_router(theme_dir: &Path) -> Router {
    let mut cfg = OverlayConfig::default();
    cfg.overlay.theme_dir = theme_dir.to_string_lossy().into_owned();
    let cfg = Arc::new(cfg);

    Router::new()
        .route("/page", get(page))
        .route("/data", get(data))
        .route("/broken", get(broken))
        .layer(middleware::from_fn_with_state(cfg, attach_overlay))
}

async fn page(Extension(overlay): Extension<OverlayHandle>) -> Html<&'static str> {
    overlay.mark("page handler");
    Html("<html><body>hello</body></html>")
}

async fn data() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

// HTML response whose body stream fails mid-flight, with a bogus length.
async fn broken() -> Response {
    let stream = futures_util::stream::once(async {
        Err::<Vec<u8>, std::io::Error>(std::io::Error::other("stream died"))
    });
    Response::builder()
        .header(header::CONTENT_TYPE, "text/html")
        .header(header::CONTENT_LENGTH, "4096")
        .body(Body::from_stream(stream))
        .unwrap()
}

#[tokio::test]
async fn fragment_is_appended_to_html_responses() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir.path().join("theme"));

    let response = app
        .oneshot(Request::get("/page").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_LENGTH).is_none());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.starts_with("<html><body>hello</body></html>"));
    assert!(text.contains("id=\"debench\""));
    assert!(text.contains("#page handler"));
}

#[tokio::test]
async fn non_html_responses_pass_through_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir.path().join("theme"));

    let response = app
        .oneshot(Request::get("/data").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert_eq!(text, r#"{"ok":true}"#);
    assert!(!text.contains("debench"));
}

#[tokio::test]
async fn buffering_failure_drops_the_stale_content_length() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir.path().join("theme"));

    let response = app
        .oneshot(Request::get("/broken").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().get(header::CONTENT_LENGTH).is_none());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}
