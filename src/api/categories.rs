use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use super::AppState;
use crate::domain::Category;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Map<String, Value>,
}

/// Categories are keyed by id in the response, the shape the web client's
/// category sidebar expects.
pub fn categories_map(categories: &[Category]) -> Map<String, Value> {
    categories
        .iter()
        .map(|c| (c.id.to_string(), Value::String(c.label.clone())))
        .collect()
}

pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = state.service.list_categories().await?;
    Ok(Json(CategoriesResponse {
        categories: categories_map(&categories),
    }))
}
