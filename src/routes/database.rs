use std::sync::Arc;

use axum::{Router, extract::State, routing::get};

use crate::{
    db::connection,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/database/init", get(init).post(init))
        .with_state(state)
}

/// Re-runs the entity schema sync against the live connection and reports the
/// outcome. Safe to call repeatedly.
async fn init(State(state): State<Arc<AppState>>) -> ApiResult<serde_json::Value> {
    connection::sync_schema(&state.db)
        .await
        .map_err(|err| AppError::internal_with_source("Database initialization failed", err))?;

    JsonApiResponse::ok(serde_json::json!({
        "initialized": true,
        "registry": connection::ENTITY_REGISTRY_PATTERN,
    }))
}
