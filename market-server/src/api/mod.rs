//! HTTP API
//!
//! Routes are grouped per resource; each module exposes a `router()` that is
//! merged here and wrapped in the shared middleware stack.

pub mod drafts;
pub mod extract;
pub mod health;
pub mod images;
pub mod items;
pub mod middleware;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Json, Router};
use http::{HeaderValue, Method};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

pub(crate) type ApiResult<T> = Result<Json<T>, AppError>;

/// Plain confirmation body: `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Request ID generator (uuid v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build the router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(items::router())
        .merge(drafts::router())
        .merge(images::router())
}

/// Build the fully configured application with all middleware and state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    build_router()
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        // CORS - only the configured front-end origin
        .layer(cors)
        // Request logging
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::x_request_id())
        // Request ID - outermost, so every inner layer sees it
        .layer(SetRequestIdLayer::x_request_id(XRequestId))
        .with_state(state)
}
