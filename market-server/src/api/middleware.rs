//! Request logging middleware
//!
//! One line when a request arrives and one when it completes, tagged with the
//! request ID set by `SetRequestIdLayer`.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{info, warn};

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let origin = req
        .headers()
        .get(http::header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        origin = %origin,
        "Request started"
    );

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            "Request completed with server error"
        );
    } else if response.status().is_client_error() {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            "Request rejected"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms = %latency_ms,
            "Request completed"
        );
    }

    response
}
