//! Axum integration: one overlay session per request, report appended to
//! HTML responses.
//!
//! The middleware constructs a [`Session`] when the request arrives,
//! exposes it to handlers through request extensions, and when the
//! response comes back buffers HTML bodies and appends the rendered
//! fragment. Non-HTML responses pass through untouched and no report is
//! emitted for them.

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use debench_core::message::MessageLevel;
use debench_core::probe;

use crate::config::OverlayConfig;
use crate::session::Session;
use crate::sysinfo::RequestInfo;

/// Cloneable handle to the per-request session, available to handlers via
/// `Extension<OverlayHandle>`.
#[derive(Clone)]
pub struct OverlayHandle(Arc<Mutex<Session>>);

impl OverlayHandle {
    fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Record a checkpoint at the caller's location.
    #[track_caller]
    pub fn mark(&self, label: &str) {
        if let Ok(mut session) = self.0.lock() {
            if let Err(e) = session.mark(label) {
                tracing::warn!(error = %e, "checkpoint rejected");
            }
        }
    }

    /// Record a message for this request's report.
    #[track_caller]
    pub fn record(&self, text: impl Into<String>, level: MessageLevel) {
        if let Ok(mut session) = self.0.lock() {
            session.record(text, level);
        }
    }

    fn finish(&self, request: RequestInfo) -> Option<String> {
        let mut session = self.0.lock().ok()?;
        session.set_request_info(request);
        match session.flush() {
            Ok(fragment) => fragment,
            Err(e) => {
                tracing::warn!(error = %e, "overlay flush failed");
                None
            }
        }
    }
}

/// Middleware entry. Wire with
/// `axum::middleware::from_fn_with_state(Arc<OverlayConfig>, attach_overlay)`.
pub async fn attach_overlay(
    State(cfg): State<Arc<OverlayConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let started = probe::now_ms();
    let method = req.method().to_string();

    let mut session = match Session::with_start(cfg.overlay.clone(), started) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "overlay disabled for this request");
            return next.run(req).await;
        }
    };
    // The fragment goes into the response body, not stdout.
    session.set_stdout_report(false);

    let handle = OverlayHandle::new(session);
    req.extensions_mut().insert(handle.clone());

    let response = next.run(req).await;
    let status = response.status().as_u16();

    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("text/html"))
        .unwrap_or(false);
    if !is_html {
        return response;
    }

    let Some(fragment) = handle.finish(RequestInfo { method, status }) else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    // The advertised length is wrong for both outcomes below.
    parts.headers.remove(header::CONTENT_LENGTH);
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "overlay body buffering failed");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let mut buf = bytes.to_vec();
    buf.extend_from_slice(fragment.as_bytes());
    Response::from_parts(parts, Body::from(buf))
}
