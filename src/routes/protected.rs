use std::sync::Arc;

use axum::{Router, extract::State, routing::get};
use uuid::Uuid;

use crate::{
    middleware::AuthGuard,
    response::{ApiResult, JsonApiResponse},
    services::ServiceContext,
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/me", get(me)).with_state(state)
}

async fn me(State(state): State<Arc<AppState>>, claims: AuthGuard) -> ApiResult<serde_json::Value> {
    let service = ServiceContext::from_state(state.as_ref()).auth(&state.jwt);
    let user = match Uuid::parse_str(&claims.sub) {
        Ok(id) => service.find_user(&id).await.ok().flatten(),
        Err(_) => None,
    };

    let email = user.as_ref().map(|u| u.email.as_str()).unwrap_or("unknown");
    let role = user
        .as_ref()
        .map(|u| u.role.as_str())
        .unwrap_or("user")
        .to_string();

    JsonApiResponse::ok(serde_json::json!({
        "ok": true,
        "sub": claims.sub,
        "email": email,
        "role": role,
        "iat": claims.iat,
        "exp": claims.exp
    }))
}
