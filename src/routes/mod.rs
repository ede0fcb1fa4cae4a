pub mod graph;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// Assemble the HTTP router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(graph::routes())
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
