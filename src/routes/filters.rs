use axum::{Router, extract::Query, routing::get};
use serde::Deserialize;

use crate::{
    error::AppError,
    hierarchy,
    response::{ApiResult, JsonApiResponse},
};

pub fn router() -> Router {
    Router::new()
        .route("/cascading-filters", get(cascading_filters))
        .route("/microtopics", get(microtopics))
}

#[derive(Debug, Deserialize)]
struct CascadingQuery {
    level: Option<String>,
    subject: Option<String>,
    module: Option<String>,
    topic: Option<String>,
}

async fn cascading_filters(
    Query(query): Query<CascadingQuery>,
) -> ApiResult<Vec<&'static str>> {
    let values = match query.level.as_deref().unwrap_or_default() {
        "subjects" => hierarchy::subjects(),
        "modules" => query
            .subject
            .as_deref()
            .map(hierarchy::modules)
            .unwrap_or_default(),
        "topics" => match (query.subject.as_deref(), query.module.as_deref()) {
            (Some(subject), Some(module)) => hierarchy::topics(subject, module),
            _ => Vec::new(),
        },
        "sub_topics" => match (
            query.subject.as_deref(),
            query.module.as_deref(),
            query.topic.as_deref(),
        ) {
            (Some(subject), Some(module), Some(topic)) => {
                hierarchy::subtopics(subject, module, topic)
            }
            _ => Vec::new(),
        },
        "question_types" => hierarchy::question_types(),
        _ => return Err(AppError::bad_request("Invalid level specified")),
    };

    JsonApiResponse::ok(values)
}

#[derive(Debug, Deserialize)]
struct MicrotopicsQuery {
    subject: Option<String>,
    topic: Option<String>,
    subtopic: Option<String>,
}

async fn microtopics(Query(query): Query<MicrotopicsQuery>) -> ApiResult<Vec<&'static str>> {
    let (Some(subject), Some(topic), Some(subtopic)) = (
        query.subject.as_deref(),
        query.topic.as_deref(),
        query.subtopic.as_deref(),
    ) else {
        return Err(AppError::bad_request(
            "Subject, topic, and subtopic parameters are required",
        ));
    };

    if !hierarchy::subjects().iter().any(|name| *name == subject) {
        return Err(AppError::not_found("Subject not found"));
    }

    JsonApiResponse::ok(hierarchy::microtopics(subject, topic, subtopic))
}
