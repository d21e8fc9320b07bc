pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{Category, NewQuestion, Question, QuizScope};
pub use error::AppError;
pub use service::{QuestionQueryService, QUESTIONS_PER_PAGE};
pub use store::{MemoryStore, QuestionStore, StoreError};
