use serde::{Deserialize, Serialize};

/// A trivia question as stored, id assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A question before insertion, without an assigned id.
///
/// Field presence is validated at the HTTP boundary; the service additionally
/// rejects empty text and non-positive difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A question category: id plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub label: String,
}

/// Category scope for quiz candidate selection.
///
/// The web client sends category id 0 (or no category) to mean "any".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizScope {
    /// Map the client's sentinel encoding to a scope. Zero and absent both
    /// mean all categories.
    pub fn from_category_id(id: Option<i64>) -> Self {
        match id {
            None | Some(0) => QuizScope::All,
            Some(id) => QuizScope::Category(id),
        }
    }

    pub fn category_id(&self) -> Option<i64> {
        match self {
            QuizScope::All => None,
            QuizScope::Category(id) => Some(*id),
        }
    }
}
