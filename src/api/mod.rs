pub mod categories;
pub mod health;
pub mod questions;
pub mod quizzes;

use crate::service::QuestionQueryService;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QuestionQueryService>,
}

impl AppState {
    pub fn new(service: Arc<QuestionQueryService>) -> Self {
        Self { service }
    }
}

pub fn create_router(state: AppState) -> Router {
    // The trivia web client is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/categories", get(categories::get_categories))
        .route(
            "/categories/:category_id/questions",
            get(questions::get_questions_by_category),
        )
        .route(
            "/questions",
            get(questions::get_questions).post(questions::create_question),
        )
        .route("/questions/:question_id", delete(questions::delete_question))
        .route("/questions/search", post(questions::search_questions))
        .route("/quizzes", post(quizzes::next_quiz_question))
        .layer(cors)
        .with_state(state)
}
