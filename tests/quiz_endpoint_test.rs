use axum::http::StatusCode;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use trivia_api::db::init_db;
use trivia_api::{api, NewQuestion, QuestionQueryService, QuestionStore, Repository};

struct TestApp {
    app: axum::Router,
    repo: Arc<Repository>,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    let service = Arc::new(QuestionQueryService::new(repo.clone()));
    let app = api::create_router(api::AppState::new(service));

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

async fn seed(repo: &Repository, text: &str, category: i64) -> i64 {
    repo.insert_question(&NewQuestion {
        question: text.to_string(),
        answer: "an answer".to_string(),
        category,
        difficulty: 1,
    })
    .await
    .unwrap()
}

async fn play(app: axum::Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/quizzes")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_quiz_returns_a_question() {
    let test_app = setup_test_app().await;
    let id = seed(&test_app.repo, "only question", 1).await;

    let (status, json) = play(
        test_app.app,
        serde_json::json!({"quizCategory": null, "previousQuestions": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["question"]["id"], id);
    assert!(json["question"]["question"].is_string());
    assert!(json["question"]["answer"].is_string());
    assert!(json["question"]["difficulty"].is_i64());
    assert!(json["question"]["category"].is_i64());
}

#[tokio::test]
async fn test_quiz_category_zero_means_all() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo, "science q", 1).await;
    seed(&test_app.repo, "history q", 2).await;

    let (status, json) = play(
        test_app.app,
        serde_json::json!({"quizCategory": {"id": 0}, "previousQuestions": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["question"].is_object());
}

#[tokio::test]
async fn test_quiz_respects_category() {
    let test_app = setup_test_app().await;
    seed(&test_app.repo, "science q", 1).await;
    let history = seed(&test_app.repo, "history q", 2).await;

    for _ in 0..10 {
        let (status, json) = play(
            test_app.app.clone(),
            serde_json::json!({"quizCategory": {"id": 2}, "previousQuestions": []}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["question"]["id"], history);
    }
}

#[tokio::test]
async fn test_quiz_excludes_previous_questions() {
    let test_app = setup_test_app().await;
    let q1 = seed(&test_app.repo, "q1", 1).await;
    let q2 = seed(&test_app.repo, "q2", 1).await;
    let q3 = seed(&test_app.repo, "q3", 1).await;

    for _ in 0..10 {
        let (status, json) = play(
            test_app.app.clone(),
            serde_json::json!({"quizCategory": null, "previousQuestions": [q1, q2]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["question"]["id"], q3);
    }
}

#[tokio::test]
async fn test_quiz_exhausted_pool_returns_null() {
    let test_app = setup_test_app().await;
    let q1 = seed(&test_app.repo, "q1", 1).await;
    let q2 = seed(&test_app.repo, "q2", 1).await;

    let (status, json) = play(
        test_app.app,
        serde_json::json!({"quizCategory": null, "previousQuestions": [q1, q2]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["question"].is_null());
}

#[tokio::test]
async fn test_quiz_empty_corpus_returns_null() {
    let test_app = setup_test_app().await;

    let (status, json) = play(
        test_app.app.clone(),
        serde_json::json!({"quizCategory": null, "previousQuestions": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["question"].is_null());
}
