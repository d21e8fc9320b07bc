//! Query service over the question bank.
//!
//! Translates high-level query intents into ordered, filtered, paginated, or
//! randomly-sampled question results. All storage access goes through the
//! injected `QuestionStore`; this layer owns the page windowing and the quiz
//! selection, nothing else.

use crate::domain::{Category, NewQuestion, Question, QuizScope};
use crate::store::{QuestionStore, StoreError};
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Fixed page window for question listings.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Error type for service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller supplied a missing or unusable input field.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Storage failure, propagated from the store unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One page of questions plus the unpaginated total, for caller-side
/// pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: usize,
}

/// Sub-slice `[(page-1)*window, page*window)` of an ordered selection.
///
/// Pages are 1-indexed. A page past the end of the data yields an empty
/// vector; whether that is an error is the caller's policy.
fn paginate(selection: &[Question], page: usize, window: usize) -> Vec<Question> {
    let start = page.saturating_sub(1).saturating_mul(window);
    let end = start.saturating_add(window).min(selection.len());
    if start >= selection.len() {
        return Vec::new();
    }
    selection[start..end].to_vec()
}

pub struct QuestionQueryService {
    store: Arc<dyn QuestionStore>,
}

impl QuestionQueryService {
    /// Create a service over the given storage capability.
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// One page of all questions, ordered by id, plus the total count.
    pub async fn list_questions(&self, page: usize) -> Result<QuestionPage, ServiceError> {
        let selection = self.store.all_questions().await?;
        let total = selection.len();
        let questions = paginate(&selection, page, QUESTIONS_PER_PAGE);
        Ok(QuestionPage { questions, total })
    }

    /// One page of questions in a single category. An unknown category id
    /// simply yields zero matches.
    pub async fn list_by_category(
        &self,
        category_id: i64,
        page: usize,
    ) -> Result<QuestionPage, ServiceError> {
        let selection = self.store.questions_by_category(category_id).await?;
        let total = selection.len();
        let questions = paginate(&selection, page, QUESTIONS_PER_PAGE);
        Ok(QuestionPage { questions, total })
    }

    /// All questions whose text contains `term`, case-insensitively.
    ///
    /// Search results are intentionally unpaginated, unlike the listing
    /// operations. An empty or whitespace-only term is rejected rather than
    /// dumping the whole table.
    pub async fn search(&self, term: &str) -> Result<QuestionPage, ServiceError> {
        if term.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "search term must not be empty".to_string(),
            ));
        }
        let questions = self.store.search_questions(term).await?;
        let total = questions.len();
        Ok(QuestionPage { questions, total })
    }

    /// Pick one question uniformly at random from the candidate set: all
    /// questions in scope minus the excluded ids. Returns `None` when the
    /// pool is exhausted, which ends a quiz session.
    pub async fn next_quiz_question(
        &self,
        scope: QuizScope,
        excluded_ids: &[i64],
    ) -> Result<Option<Question>, ServiceError> {
        let candidates = self
            .store
            .quiz_candidates(scope.category_id(), excluded_ids)
            .await?;
        debug!(
            candidates = candidates.len(),
            excluded = excluded_ids.len(),
            "quiz candidate pool"
        );
        if candidates.is_empty() {
            return Ok(None);
        }
        let pick = rand::thread_rng().gen_range(0..candidates.len());
        Ok(candidates.into_iter().nth(pick))
    }

    /// Insert a new question, returning the assigned id.
    pub async fn create_question(&self, new: &NewQuestion) -> Result<i64, ServiceError> {
        if new.question.trim().is_empty() || new.answer.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "question and answer must not be empty".to_string(),
            ));
        }
        if new.difficulty < 1 {
            return Err(ServiceError::InvalidInput(
                "difficulty must be a positive integer".to_string(),
            ));
        }
        Ok(self.store.insert_question(new).await?)
    }

    /// Hard-delete a question by id.
    pub async fn delete_question(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.store.delete_question(id).await?)
    }

    /// All categories, ordered by id.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.store.all_categories().await?)
    }
}
