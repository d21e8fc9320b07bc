//! In-memory question store for testing without a database file.

use super::{QuestionStore, StoreError};
use crate::domain::{Category, NewQuestion, Question};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory store backed by plain vectors. Ids are allocated monotonically,
/// matching sqlite's AUTOINCREMENT behavior.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
struct Inner {
    questions: Vec<Question>,
    categories: Vec<Category>,
    next_question_id: i64,
    next_category_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                questions: Vec::new(),
                categories: Vec::new(),
                next_question_id: 1,
                next_category_id: 1,
            }),
        }
    }

    /// Seed a question, returning the assigned id.
    pub fn add_question(&self, question: &str, answer: &str, category: i64, difficulty: i64) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_question_id;
        inner.next_question_id += 1;
        inner.questions.push(Question {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            category,
            difficulty,
        });
        id
    }

    /// Seed a category, returning the assigned id.
    pub fn add_category(&self, label: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_category_id;
        inner.next_category_id += 1;
        inner.categories.push(Category {
            id,
            label: label.to_string(),
        });
        id
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut questions = inner.questions.clone();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }

    async fn questions_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<Question>, StoreError> {
        let mut questions: Vec<Question> = self
            .inner
            .lock()
            .unwrap()
            .questions
            .iter()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let needle = term.to_lowercase();
        let mut questions: Vec<Question> = self
            .inner
            .lock()
            .unwrap()
            .questions
            .iter()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }

    async fn quiz_candidates(
        &self,
        category_id: Option<i64>,
        excluded: &[i64],
    ) -> Result<Vec<Question>, StoreError> {
        let mut questions: Vec<Question> = self
            .inner
            .lock()
            .unwrap()
            .questions
            .iter()
            .filter(|q| category_id.map_or(true, |c| q.category == c))
            .filter(|q| !excluded.contains(&q.id))
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, StoreError> {
        Ok(self.add_question(
            &question.question,
            &question.answer,
            question.category,
            question.difficulty,
        ))
    }

    async fn delete_question(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.questions.len();
        inner.questions.retain(|q| q.id != id);
        if inner.questions.len() == before {
            return Err(StoreError::QuestionNotFound(id));
        }
        Ok(())
    }

    async fn all_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories = self.inner.lock().unwrap().categories.clone();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn insert_category(&self, label: &str) -> Result<i64, StoreError> {
        Ok(self.add_category(label))
    }
}
