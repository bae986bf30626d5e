use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::dto::MessageResponse;
use crate::AppState;

pub const API_MESSAGE: &str = "Valentine's Week App API - Ready to spread love!";

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let tracked_users = state.store.user_count().await;
    Json(json!({
        "status": "ok",
        "service": "valentine-week-api",
        "version": env!("CARGO_PKG_VERSION"),
        "tracked_users": tracked_users,
    }))
}

/// GET /api/
pub async fn api_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: API_MESSAGE.to_string(),
    })
}
