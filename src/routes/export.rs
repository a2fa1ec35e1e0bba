use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    services::{
        ServiceContext,
        export_service::{self, ExportFormat, ExportMeta, ExportRow},
    },
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/export", post(export))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub test_id: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<ExportQuestionBody>>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub test_name: Option<String>,
    #[serde(default)]
    pub test_batch: Option<String>,
    #[serde(default)]
    pub test_date: Option<String>,
}

/// Ad-hoc question payload for exports that bypass the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportQuestionBody {
    pub text: String,
    pub subject: String,
    pub topic: String,
    pub sub_topic: String,
    pub micro_topic: String,
    pub difficulty_level: String,
    pub answer: String,
    pub explanation: String,
}

impl Default for ExportQuestionBody {
    fn default() -> Self {
        Self {
            text: String::new(),
            subject: String::new(),
            topic: "N/A".to_string(),
            sub_topic: String::new(),
            micro_topic: String::new(),
            difficulty_level: "Medium".to_string(),
            answer: String::new(),
            explanation: "N/A".to_string(),
        }
    }
}

async fn export(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExportRequest>,
) -> Result<Response, AppError> {
    if body.test_id.is_none() && body.questions.is_none() {
        return Err(AppError::bad_request(
            "Test ID or questions array is required",
        ));
    }

    let rows = match &body.questions {
        Some(questions) if !questions.is_empty() => {
            questions.iter().map(ExportRow::from).collect()
        }
        _ => {
            let test_id = body
                .test_id
                .as_deref()
                .ok_or_else(|| AppError::bad_request("Test ID or questions array is required"))?;
            let service = ServiceContext::from_state(state.as_ref()).cart();
            let questions = service
                .questions_for_test(test_id)
                .await?
                .ok_or_else(|| AppError::not_found("Cart not found"))?;
            questions.iter().map(ExportRow::from).collect::<Vec<_>>()
        }
    };

    let meta = ExportMeta {
        test_name: body.test_name,
        batch: body.test_batch,
        date: body.test_date,
    };

    let format = ExportFormat::parse(body.format.as_deref());
    let bytes = export_service::build(format, &rows, &meta)?;
    let file_name = export_service::file_name(body.test_id.as_deref(), format);

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={file_name}"),
            ),
        ],
        bytes,
    )
        .into_response())
}

impl From<&ExportQuestionBody> for ExportRow {
    fn from(body: &ExportQuestionBody) -> Self {
        Self {
            question: body.text.clone(),
            subject: body.subject.clone(),
            topic: body.topic.clone(),
            sub_topic: body.sub_topic.clone(),
            micro_topic: body.micro_topic.clone(),
            difficulty: body.difficulty_level.clone(),
            answer: body.answer.clone(),
            explanation: body.explanation.clone(),
        }
    }
}
