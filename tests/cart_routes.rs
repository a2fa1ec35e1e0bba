use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use qbank::{
    config::AppConfig,
    db::connection,
    routes::{API_PREFIX, router},
    state::AppState,
    test_helpers::{test_config, test_router},
};

const SECRET: &[u8] = b"test-secret";

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

async fn app_with_db() -> std::sync::Arc<AppState> {
    let cfg = AppConfig::from_env().expect("load app config");
    let db_cfg = cfg
        .database
        .clone()
        .expect("database config should be present in integration tests");
    let db = connection::connect(&db_cfg).await.expect("connect to database");

    let mut cfg = test_config(SECRET);
    cfg.database = Some(db_cfg);
    AppState::new(cfg, db)
}

async fn post_json(
    app: axum::Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path(path))
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = res.status();
    let bytes = body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn get_json(
    state: &std::sync::Arc<AppState>,
    path: &str,
) -> (StatusCode, serde_json::Value) {
    let res = router(state.clone())
        .oneshot(
            Request::builder()
                .uri(api_path(path))
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

async fn seed_question(state: &std::sync::Arc<AppState>, text: &str) -> i64 {
    let (status, json) = post_json(
        router(state.clone()),
        "/questions/add",
        json!({
            "text": text,
            "answer": "42",
            "subject": "Economics",
            "moduleName": "Module_1",
            "topic": "Introduction to Economics",
            "difficultyLevel": "Medium",
            "questionType": "Objective"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    data(&json)["id"].as_i64().expect("created question id")
}

async fn draft_items(state: &std::sync::Arc<AppState>, test_id: &str, user_id: &Uuid) -> Vec<i64> {
    let (status, json) = get_json(
        state,
        &format!("/cart?testId={test_id}&userId={user_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    data(&json)
        .as_array()
        .expect("cart data should be an array")
        .iter()
        .map(|entry| entry["id"].as_i64().expect("question id"))
        .collect()
}

#[tokio::test]
async fn draft_requires_a_user_id() {
    let (status, json) = post_json(
        test_router(SECRET),
        "/cart/draft",
        json!({ "testName": "Mock Test", "questionIds": [1, 2] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "User ID is required");
}

#[tokio::test]
async fn draft_requires_a_test_name() {
    let (status, json) = post_json(
        test_router(SECRET),
        "/cart/draft",
        json!({ "userId": Uuid::new_v4(), "questionIds": [1, 2] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Test name is required");
}

#[tokio::test]
async fn draft_requires_question_ids() {
    let (status, json) = post_json(
        test_router(SECRET),
        "/cart/draft",
        json!({ "userId": Uuid::new_v4(), "testName": "Mock Test", "questionIds": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Question IDs are required");
}

#[tokio::test]
async fn cart_add_requires_a_test_id() {
    let (status, json) = post_json(
        test_router(SECRET),
        "/cart/question",
        json!({ "questionId": 5, "testId": "  " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Test ID is required");
}

#[tokio::test]
#[ignore = "requires database"]
async fn draft_save_then_resave_replaces_not_appends() {
    let state = app_with_db().await;
    let user_id = Uuid::new_v4();

    let q1 = seed_question(&state, &format!("Q1 {}", Uuid::new_v4())).await;
    let q2 = seed_question(&state, &format!("Q2 {}", Uuid::new_v4())).await;
    let q3 = seed_question(&state, &format!("Q3 {}", Uuid::new_v4())).await;

    let (status, json) = post_json(
        router(state.clone()),
        "/cart/draft",
        json!({
            "userId": user_id,
            "testName": "Replace Test",
            "batch": "2026A",
            "date": "2026-01-15",
            "questionIds": [q1, q2]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let test_id = data(&json)["testId"].as_str().unwrap().to_string();

    let (status, _) = post_json(
        router(state.clone()),
        "/cart/draft",
        json!({
            "userId": user_id,
            "testName": "Replace Test",
            "questionIds": [q3],
            "existingTestId": test_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let mut items = draft_items(&state, &test_id, &user_id).await;
    items.sort();
    assert_eq!(items, vec![q3]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn adding_the_same_question_twice_keeps_one_row() {
    let state = app_with_db().await;
    let test_id = format!("test_{}", Uuid::new_v4().simple());
    let question_id = seed_question(&state, &format!("Dup {}", Uuid::new_v4())).await;

    let (status, json) = post_json(
        router(state.clone()),
        "/cart/question",
        json!({ "questionId": question_id, "testId": test_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&json)["added"], true);

    let (status, json) = post_json(
        router(state.clone()),
        "/cart/question",
        json!({ "questionId": question_id, "testId": test_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&json)["added"], false);

    let (status, json) = get_json(&state, &format!("/cart?testId={test_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let matches = data(&json)
        .as_array()
        .unwrap()
        .iter()
        .filter(|entry| entry["id"].as_i64() == Some(question_id))
        .count();
    assert_eq!(matches, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn removing_an_absent_question_reports_failure_without_error() {
    let state = app_with_db().await;
    let test_id = format!("test_{}", Uuid::new_v4().simple());
    let question_id = seed_question(&state, &format!("Rm {}", Uuid::new_v4())).await;

    let (status, json) = post_json(
        router(state.clone()),
        "/cart/remove",
        json!({ "questionId": question_id, "testId": test_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&json)["success"], false);

    let (_, _) = post_json(
        router(state.clone()),
        "/cart/question",
        json!({ "questionId": question_id, "testId": test_id }),
    )
    .await;

    let (status, json) = post_json(
        router(state.clone()),
        "/cart/remove",
        json!({ "questionId": question_id, "testId": test_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data(&json)["success"], true);
}

#[tokio::test]
#[ignore = "requires database"]
async fn saved_drafts_show_up_in_the_test_list() {
    let state = app_with_db().await;
    let user_id = Uuid::new_v4();
    let question_id = seed_question(&state, &format!("List {}", Uuid::new_v4())).await;

    let (status, json) = post_json(
        router(state.clone()),
        "/cart/draft",
        json!({
            "userId": user_id,
            "testName": "Listed Test",
            "questionIds": [question_id]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let test_id = data(&json)["testId"].as_str().unwrap().to_string();

    let (status, json) = get_json(&state, "/tests").await;
    assert_eq!(status, StatusCode::OK);
    let entry = data(&json)
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["testId"].as_str() == Some(test_id.as_str()))
        .expect("saved draft should be listed")
        .clone();
    assert_eq!(entry["questionCount"], 1);
    assert_eq!(entry["testName"], "Listed Test");
}
