use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use super::categories::categories_map;
use super::AppState;
use crate::domain::{NewQuestion, Question};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Pages are 1-indexed; an absent or malformed value means page 1.
    pub fn page_or_default(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Map<String, Value>,
    pub current_category: Option<i64>,
}

pub async fn get_questions(
    Query(params): Query<PageQuery>,
    State(state): State<AppState>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let page = params.page_or_default();
    let result = state.service.list_questions(page).await?;

    // Empty primary listing maps to not-found, a policy of this HTTP layer.
    if result.questions.is_empty() && result.total > 0 {
        return Err(AppError::NotFound(format!("no questions on page {}", page)));
    }
    if result.total == 0 {
        return Err(AppError::NotFound("no questions available".to_string()));
    }

    let categories = state.service.list_categories().await?;

    Ok(Json(QuestionsResponse {
        questions: result.questions,
        total_questions: result.total,
        categories: categories_map(&categories),
        current_category: None,
    }))
}

pub async fn get_questions_by_category(
    Path(category_id): Path<i64>,
    Query(params): Query<PageQuery>,
    State(state): State<AppState>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let page = params.page_or_default();
    let result = state.service.list_by_category(category_id, page).await?;

    if result.questions.is_empty() {
        return Err(AppError::NotFound(format!(
            "no questions for category {} on page {}",
            category_id, page
        )));
    }

    let categories = state.service.list_categories().await?;

    Ok(Json(QuestionsResponse {
        questions: result.questions,
        total_questions: result.total,
        categories: categories_map(&categories),
        current_category: Some(category_id),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

impl CreateQuestionRequest {
    fn into_new_question(self) -> Result<NewQuestion, AppError> {
        let question = self
            .question
            .ok_or_else(|| AppError::BadRequest("missing field: question".to_string()))?;
        let answer = self
            .answer
            .ok_or_else(|| AppError::BadRequest("missing field: answer".to_string()))?;
        let category = self
            .category
            .ok_or_else(|| AppError::BadRequest("missing field: category".to_string()))?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| AppError::BadRequest("missing field: difficulty".to_string()))?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub created: i64,
}

pub async fn create_question(
    State(state): State<AppState>,
    Json(body): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let new_question = body.into_new_question()?;
    let id = state.service.create_question(&new_question).await?;
    info!(question_id = id, "question created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { created: id })))
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i64,
}

pub async fn delete_question(
    Path(question_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeletedResponse>, AppError> {
    state.service.delete_question(question_id).await?;
    info!(question_id, "question deleted");
    Ok(Json(DeletedResponse {
        deleted: question_id,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

pub async fn search_questions(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let term = body
        .search_term
        .ok_or_else(|| AppError::BadRequest("missing field: searchTerm".to_string()))?;
    let result = state.service.search(&term).await?;
    Ok(Json(SearchResponse {
        questions: result.questions,
        total_questions: result.total,
    }))
}
