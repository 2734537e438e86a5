//! Debench demo server.
//!
//! Serves a couple of HTML pages with the overlay middleware attached so
//! the rendered widget can be inspected in a browser. Config comes from
//! `debench.yaml` when present, defaults otherwise.

use std::sync::Arc;

use axum::extract::Extension;
use axum::response::Html;
use axum::routing::get;
use axum::{middleware, Router};
use tracing_subscriber::{fmt, EnvFilter};

use debench_core::message::MessageLevel;
use debench_overlay::config::{self, OverlayConfig};
use debench_overlay::http::{attach_overlay, OverlayHandle};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match config::load_from_file("debench.yaml") {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::info!(error = %e, "no usable debench.yaml, using defaults");
            OverlayConfig::default()
        }
    };
    let cfg = Arc::new(cfg);

    let app = Router::new()
        .route("/", get(index))
        .route("/slow", get(slow))
        .layer(middleware::from_fn_with_state(cfg, attach_overlay));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .expect("failed to bind");
    tracing::info!("debench demo listening on 127.0.0.1:8080");

    axum::serve(listener, app).await.expect("server failed");
}

async fn index(Extension(overlay): Extension<OverlayHandle>) -> Html<String> {
    overlay.mark("index start");

    let rows: String = (0..50).map(|i| format!("<li>row {i}</li>")).collect();
    overlay.record("rows rendered", MessageLevel::Info);

    overlay.mark("index done");
    Html(format!("<html><body><ul>{rows}</ul></body></html>"))
}

async fn slow(Extension(overlay): Extension<OverlayHandle>) -> Html<&'static str> {
    overlay.mark("before sleep");
    tokio::time::sleep(std::time::Duration::from_millis(120)).await;
    overlay.mark("after sleep");

    Html("<html><body>done</body></html>")
}
