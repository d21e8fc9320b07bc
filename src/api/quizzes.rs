use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{Question, QuizScope};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub quiz_category: Option<QuizCategory>,
    #[serde(default)]
    pub previous_questions: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    /// `null` once the candidate pool is exhausted, which ends the session.
    pub question: Option<Question>,
}

pub async fn next_quiz_question(
    State(state): State<AppState>,
    Json(body): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    let scope = QuizScope::from_category_id(body.quiz_category.map(|c| c.id));
    let question = state
        .service
        .next_quiz_question(scope, &body.previous_questions)
        .await?;
    Ok(Json(QuizResponse { question }))
}
