use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    response::{ApiResult, JsonApiResponse},
    routes::questions::QuestionResponse,
    services::{CartService, DraftSummary, SaveDraftInput, ServiceContext},
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cart", get(cart_contents))
        .route("/cart/draft", post(save_draft))
        .route("/cart/question", post(add_question))
        .route("/cart/remove", post(remove_question))
        .route("/tests", get(list_tests))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub test_name: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub question_ids: Vec<i64>,
    #[serde(default)]
    pub existing_test_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub question_id: i64,
    pub test_id: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuery {
    pub test_id: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub test_id: String,
    pub test_name: Option<String>,
    pub batch: Option<String>,
    pub date: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub question_count: u64,
}

async fn save_draft(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DraftRequest>,
) -> ApiResult<serde_json::Value> {
    let service = cart_service(&state);
    let test_id = service
        .save_draft(SaveDraftInput {
            user_id: body.user_id,
            test_name: body.test_name.unwrap_or_default(),
            batch: body.batch,
            date: body.date,
            question_ids: body.question_ids,
            existing_test_id: body.existing_test_id,
        })
        .await?;
    JsonApiResponse::ok(serde_json::json!({ "success": true, "testId": test_id }))
}

async fn add_question(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CartItemRequest>,
) -> ApiResult<serde_json::Value> {
    let service = cart_service(&state);
    let added = service
        .add_question(&body.test_id, body.question_id, body.user_id)
        .await?;
    JsonApiResponse::ok(serde_json::json!({ "success": true, "added": added }))
}

async fn remove_question(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CartItemRequest>,
) -> ApiResult<serde_json::Value> {
    let service = cart_service(&state);
    let removed = service
        .remove_question(&body.test_id, body.question_id, body.user_id)
        .await?;
    JsonApiResponse::ok(serde_json::json!({ "success": removed }))
}

async fn cart_contents(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CartQuery>,
) -> ApiResult<Vec<QuestionResponse>> {
    let service = cart_service(&state);
    let questions = service
        .cart_questions(&query.test_id, query.user_id)
        .await?;
    JsonApiResponse::ok(questions.into_iter().map(QuestionResponse::from).collect())
}

async fn list_tests(State(state): State<Arc<AppState>>) -> ApiResult<Vec<DraftResponse>> {
    let service = cart_service(&state);
    let drafts = service.list_drafts().await?;
    JsonApiResponse::ok(drafts.into_iter().map(DraftResponse::from).collect())
}

impl From<DraftSummary> for DraftResponse {
    fn from(draft: DraftSummary) -> Self {
        Self {
            test_id: draft.test_id,
            test_name: draft.test_name,
            batch: draft.batch,
            date: draft.test_date,
            created_at: draft.created_at,
            question_count: draft.question_count,
        }
    }
}

fn cart_service(state: &Arc<AppState>) -> CartService {
    ServiceContext::from_state(state.as_ref()).cart()
}
