//! Root and health check endpoints

use axum::Json;
use axum::extract::State;

use super::MessageResponse;
use crate::db;
use crate::state::AppState;

/// GET / - liveness message
pub async fn root() -> Json<MessageResponse> {
    MessageResponse::new("Hello, world!")
}

/// GET /health - database reachability and build version
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_ok = db::ping(&state.pool).await;
    let status = if db_ok { "ok" } else { "degraded" };
    Json(serde_json::json!({
        "status": status,
        "db": db_ok,
        "service": "market-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
