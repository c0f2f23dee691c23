use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. The proxy holds no connections or state, so being able to answer is enough.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "genai-proxy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
