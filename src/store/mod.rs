//! Storage capability consumed by the query service.
//!
//! The service never talks to sqlite directly; it depends on this trait so
//! the query logic can be exercised against an in-memory store in tests.

use crate::domain::{Category, NewQuestion, Question};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Delete (or lookup) referenced a question id that does not exist.
    #[error("question {0} not found")]
    QuestionNotFound(i64),
    /// Underlying database failure, propagated unchanged.
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Collection-query capability over the question bank.
///
/// All listing methods return rows ordered by id ascending so pagination
/// windows are stable across calls.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Fetch every question, ordered by id.
    async fn all_questions(&self) -> Result<Vec<Question>, StoreError>;

    /// Fetch questions in one category, ordered by id. An unknown category
    /// yields an empty vector, not an error.
    async fn questions_by_category(&self, category_id: i64)
        -> Result<Vec<Question>, StoreError>;

    /// Case-insensitive substring match over question text only.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;

    /// Questions eligible for quiz play: optionally restricted to one
    /// category, minus the excluded ids.
    async fn quiz_candidates(
        &self,
        category_id: Option<i64>,
        excluded: &[i64],
    ) -> Result<Vec<Question>, StoreError>;

    /// Insert a question, returning the assigned id.
    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, StoreError>;

    /// Hard-delete a question by id. Deleting an unknown id is
    /// `QuestionNotFound`, never a silent success.
    async fn delete_question(&self, id: i64) -> Result<(), StoreError>;

    /// Fetch every category, ordered by id.
    async fn all_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Insert a category, returning the assigned id.
    async fn insert_category(&self, label: &str) -> Result<i64, StoreError>;
}
