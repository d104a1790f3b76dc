use crate::core::server::AppState;
use axum::extract::State;
use axum::Json;

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "started_at": state.started_at,
    }))
}
