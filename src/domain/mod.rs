//! Domain types for the trivia question bank.
//!
//! This module provides:
//! - `Question` and `Category` entities as stored
//! - `NewQuestion` for inserts before an id is assigned
//! - `QuizScope` for selecting the quiz candidate pool

pub mod question;

pub use question::{Category, NewQuestion, Question, QuizScope};
