use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::TokenBundle,
    error::AppError,
    middleware::{AuthGuard, AuthRoleGuard},
    response::{ApiResult, JsonApiResponse},
    services::{AuthService, ServiceContext},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, serde::Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: usize,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/revoke-all", post(revoke_all))
        .route("/auth/cleanup", post(cleanup))
        .with_state(state)
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<TokenResponse> {
    let service = auth_service(&state);
    let tokens = service.register(&body.email, &body.password).await?;
    JsonApiResponse::ok(tokens.into())
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let service = auth_service(&state);
    let tokens = service.login(&body.email, &body.password).await?;
    JsonApiResponse::ok(tokens.into())
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequest>,
) -> ApiResult<TokenResponse> {
    let service = auth_service(&state);
    let tokens = service.refresh(&body.refresh_token).await?;
    JsonApiResponse::ok(tokens.into())
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequest>,
) -> ApiResult<serde_json::Value> {
    let service = auth_service(&state);
    service.logout(&body.refresh_token).await?;
    JsonApiResponse::ok(serde_json::json!({ "success": true }))
}

async fn revoke_all(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
) -> ApiResult<serde_json::Value> {
    let user_id = parse_subject(&claims.sub)?;
    let service = auth_service(&state);
    let revoked = service.revoke_all(&user_id).await?;
    JsonApiResponse::ok(serde_json::json!({ "success": true, "revoked": revoked }))
}

async fn cleanup(
    State(state): State<Arc<AppState>>,
    _admin: AuthRoleGuard<crate::auth::AdminRole>,
) -> ApiResult<serde_json::Value> {
    let service = auth_service(&state);
    let purged = service.cleanup_expired().await?;
    JsonApiResponse::ok(serde_json::json!({ "success": true, "purged": purged }))
}

fn parse_subject(sub: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(sub).map_err(|_| AppError::unauthorized("Invalid token subject"))
}

fn auth_service(state: &Arc<AppState>) -> AuthService {
    ServiceContext::from_state(state.as_ref()).auth(&state.jwt)
}

impl From<TokenBundle> for TokenResponse {
    fn from(bundle: TokenBundle) -> Self {
        Self {
            access_token: bundle.access_token,
            refresh_token: bundle.refresh_token,
            token_type: bundle.token_type,
            expires_in: bundle.expires_in,
        }
    }
}
