use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::{
    db::dao::{NewQuestion, QuestionFilter, QuestionPatch},
    db::entities::question,
    response::{ApiResult, JsonApiResponse},
    services::{QuestionService, ServiceContext},
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/questions", post(search))
        .route("/questions/add", post(add))
        .route("/questions/batch", post(batch))
        .route("/questions/edit", post(edit))
        .route("/questions/delete", post(delete))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchRequest {
    pub filters: SearchFilters,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Filter keys mirror the question columns; every list is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub subject: Vec<String>,
    pub module: Vec<String>,
    pub topic: Vec<String>,
    pub sub_topic: Vec<String>,
    pub question_type: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest {
    pub text: String,
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    pub subject: String,
    pub module_name: String,
    pub topic: String,
    #[serde(default)]
    pub sub_topic: Option<String>,
    #[serde(default)]
    pub micro_topic: Option<String>,
    pub difficulty_level: String,
    pub question_type: String,
    #[serde(default)]
    pub nature_of_question: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub questions: Vec<AddQuestionRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditQuestionRequest {
    pub id: i64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub module_name: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub sub_topic: Option<String>,
    #[serde(default)]
    pub micro_topic: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<String>,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub nature_of_question: Option<String>,
    #[serde(default)]
    pub faculty_approved: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuestionRequest {
    pub id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: i64,
    pub text: String,
    pub answer: String,
    pub explanation: String,
    pub subject: String,
    pub module_name: String,
    pub topic: String,
    pub sub_topic: String,
    pub micro_topic: String,
    pub difficulty_level: String,
    pub question_type: String,
    pub nature_of_question: String,
    pub faculty_approved: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPageResponse {
    pub questions: Vec<QuestionResponse>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<QuestionPageResponse> {
    let service = question_service(&state);
    let filter = QuestionFilter {
        subjects: body.filters.subject,
        modules: body.filters.module,
        topics: body.filters.topic,
        sub_topics: body.filters.sub_topic,
        question_types: body.filters.question_type,
        search: body.search,
        page: body.page.unwrap_or(1),
        page_size: body.page_size.unwrap_or(0),
    };

    let page = service.search(filter).await?;
    JsonApiResponse::ok(QuestionPageResponse {
        questions: page
            .questions
            .into_iter()
            .map(QuestionResponse::from)
            .collect(),
        page: page.page,
        page_size: page.page_size,
        total: page.total,
        total_pages: page.total_pages,
    })
}

async fn add(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddQuestionRequest>,
) -> ApiResult<QuestionResponse> {
    let service = question_service(&state);
    let question = service.create(body.into()).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", question.into())
}

async fn batch(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BatchRequest>,
) -> ApiResult<serde_json::Value> {
    let service = question_service(&state);
    let inserted = service
        .create_many(body.questions.into_iter().map(NewQuestion::from).collect())
        .await?;
    JsonApiResponse::with_status(
        StatusCode::CREATED,
        "created",
        serde_json::json!({ "inserted": inserted }),
    )
}

async fn edit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EditQuestionRequest>,
) -> ApiResult<QuestionResponse> {
    let service = question_service(&state);
    let id = body.id;
    let question = service.update(id, body.into_patch()).await?;
    JsonApiResponse::ok(question.into())
}

async fn delete(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DeleteQuestionRequest>,
) -> ApiResult<serde_json::Value> {
    let service = question_service(&state);
    service.delete(body.id).await?;
    JsonApiResponse::ok(serde_json::json!({ "success": true }))
}

impl EditQuestionRequest {
    fn into_patch(self) -> QuestionPatch {
        QuestionPatch {
            text: self.text,
            answer: self.answer,
            explanation: self.explanation,
            subject: self.subject,
            module_name: self.module_name,
            topic: self.topic,
            sub_topic: self.sub_topic,
            micro_topic: self.micro_topic,
            difficulty_level: self.difficulty_level,
            question_type: self.question_type,
            nature_of_question: self.nature_of_question,
            faculty_approved: self.faculty_approved,
        }
    }
}

impl From<AddQuestionRequest> for NewQuestion {
    fn from(body: AddQuestionRequest) -> Self {
        Self {
            text: body.text,
            answer: body.answer,
            explanation: body.explanation,
            subject: body.subject,
            module_name: body.module_name,
            topic: body.topic,
            sub_topic: body.sub_topic,
            micro_topic: body.micro_topic,
            difficulty_level: body.difficulty_level,
            question_type: body.question_type,
            nature_of_question: body.nature_of_question,
        }
    }
}

impl From<question::Model> for QuestionResponse {
    fn from(model: question::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            answer: model.answer,
            explanation: model.explanation.unwrap_or_default(),
            subject: model.subject,
            module_name: model.module_name,
            topic: model.topic,
            sub_topic: model.sub_topic.unwrap_or_default(),
            micro_topic: model.micro_topic.unwrap_or_default(),
            difficulty_level: model.difficulty_level,
            question_type: model.question_type,
            nature_of_question: model.nature_of_question.unwrap_or_default(),
            faculty_approved: model.faculty_approved,
            created_at: model.created_at,
        }
    }
}

fn question_service(state: &Arc<AppState>) -> QuestionService {
    ServiceContext::from_state(state.as_ref()).question()
}
