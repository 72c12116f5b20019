use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and the batch pool cap.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-api",
        "match_pool_size": state.config.match_pool_size,
        "store": if state.config.uses_memory_store() { "memory" } else { "postgres" }
    }))
}
