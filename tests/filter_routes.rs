use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use qbank::{routes::API_PREFIX, test_helpers::test_router};

const SECRET: &[u8] = b"test-secret";

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = test_router(SECRET);
    let res = app
        .oneshot(
            Request::builder()
                .uri(format!("{API_PREFIX}{uri}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = res.status();
    let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn data(json: &serde_json::Value) -> &serde_json::Value {
    json.get("data").unwrap_or(json)
}

fn as_strings(json: &serde_json::Value) -> Vec<String> {
    data(json)
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|value| value.as_str().expect("entry should be a string").to_string())
        .collect()
}

#[tokio::test]
async fn subjects_level_lists_every_subject() {
    let (status, json) = get_json("/cascading-filters?level=subjects").await;

    assert_eq!(status, StatusCode::OK);
    let subjects = as_strings(&json);
    assert!(subjects.contains(&"Economics".to_string()));
    assert!(subjects.contains(&"Ecology and Environment".to_string()));
}

#[tokio::test]
async fn modules_level_follows_the_subject() {
    let (status, json) = get_json("/cascading-filters?level=modules&subject=History").await;

    assert_eq!(status, StatusCode::OK);
    let modules = as_strings(&json);
    assert!(modules.contains(&"Medieval History".to_string()));
}

#[tokio::test]
async fn modules_level_without_subject_is_empty() {
    let (status, json) = get_json("/cascading-filters?level=modules").await;

    assert_eq!(status, StatusCode::OK);
    assert!(as_strings(&json).is_empty());
}

#[tokio::test]
async fn topics_level_needs_subject_and_module() {
    let (status, json) =
        get_json("/cascading-filters?level=topics&subject=Economics&module=Module_2").await;

    assert_eq!(status, StatusCode::OK);
    let topics = as_strings(&json);
    assert_eq!(
        topics,
        vec![
            "National Income".to_string(),
            "Balance of Payments".to_string(),
            "Foreign Exchange Rates".to_string()
        ]
    );
}

#[tokio::test]
async fn sub_topics_level_follows_the_full_path() {
    let (status, json) = get_json(
        "/cascading-filters?level=sub_topics&subject=Economics&module=Module_4&topic=Inflation",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(as_strings(&json).contains(&"Stagflation".to_string()));
}

#[tokio::test]
async fn question_types_level_is_fixed() {
    let (status, json) = get_json("/cascading-filters?level=question_types").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_strings(&json),
        vec!["Objective".to_string(), "Subjective".to_string()]
    );
}

#[tokio::test]
async fn unknown_level_is_a_bad_request() {
    let (status, json) = get_json("/cascading-filters?level=galaxies").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid level specified");
}

#[tokio::test]
async fn unknown_subject_yields_an_empty_module_list() {
    let (status, json) = get_json("/cascading-filters?level=modules&subject=Astrology").await;

    assert_eq!(status, StatusCode::OK);
    assert!(as_strings(&json).is_empty());
}

#[tokio::test]
async fn microtopics_require_all_three_parameters() {
    let (status, json) = get_json("/microtopics?subject=History").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "Subject, topic, and subtopic parameters are required"
    );
}

#[tokio::test]
async fn microtopics_for_unknown_subject_is_not_found() {
    let (status, _) =
        get_json("/microtopics?subject=Astrology&topic=Stars&subtopic=Signs").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn microtopics_merge_across_modules_without_duplicates() {
    let (status, json) = get_json(
        "/microtopics?subject=History&topic=Ancient%20History&subtopic=Mauryan%20Empire",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_strings(&json),
        vec![
            "Ashokan Edicts".to_string(),
            "Mauryan Administration".to_string()
        ]
    );
}
