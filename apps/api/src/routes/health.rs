use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Liveness probe; not gated by the access code.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
