//! Repository layer implementing the `QuestionStore` capability over SQLite.

use crate::domain::{Category, NewQuestion, Question};
use crate::store::{QuestionStore, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

/// Repository for question and category operations.
pub struct Repository {
    pool: SqlitePool,
}

fn question_from_row(row: &sqlx::sqlite::SqliteRow) -> Question {
    Question {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        category: row.get("category"),
        difficulty: row.get("difficulty"),
    }
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }
}

#[async_trait]
impl QuestionStore for Repository {
    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    async fn questions_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<Question>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE category = ?
            ORDER BY id ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        // LIKE is case-insensitive for ASCII by default in SQLite; escape the
        // pattern metacharacters so user input matches literally.
        let pattern = format!(
            "%{}%",
            term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
        );
        let rows = sqlx::query(
            r#"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question LIKE ? ESCAPE '\'
            ORDER BY id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    async fn quiz_candidates(
        &self,
        category_id: Option<i64>,
        excluded: &[i64],
    ) -> Result<Vec<Question>, StoreError> {
        let placeholders = vec!["?"; excluded.len()].join(",");
        let mut sql = String::from(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE 1=1",
        );
        if category_id.is_some() {
            sql.push_str(" AND category = ?");
        }
        if !excluded.is_empty() {
            sql.push_str(&format!(" AND id NOT IN ({})", placeholders));
        }
        sql.push_str(" ORDER BY id ASC");

        let mut query = sqlx::query(&sql);
        if let Some(category_id) = category_id {
            query = query.bind(category_id);
        }
        for id in excluded {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(question_from_row).collect())
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn delete_question(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::QuestionNotFound(id));
        }
        Ok(())
    }

    async fn all_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, type
            FROM categories
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Category {
                id: row.get("id"),
                label: row.get("type"),
            })
            .collect())
    }

    async fn insert_category(&self, label: &str) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO categories (type) VALUES (?)")
            .bind(label)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::init_db;
    use tempfile::TempDir;

    async fn setup_test_db() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (Repository::new(pool), temp_dir)
    }

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "an answer".to_string(),
            category,
            difficulty: 2,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_monotonic_ids() {
        let (repo, _temp) = setup_test_db().await;

        let first = repo.insert_question(&new_question("q1", 1)).await.unwrap();
        repo.delete_question(first).await.unwrap();
        let second = repo.insert_question(&new_question("q2", 1)).await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_all_questions_ordered_by_id() {
        let (repo, _temp) = setup_test_db().await;

        for i in 0..5 {
            repo.insert_question(&new_question(&format!("q{}", i), 1))
                .await
                .unwrap();
        }

        let questions = repo.all_questions().await.unwrap();
        let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(questions.len(), 5);
    }

    #[tokio::test]
    async fn test_questions_by_category_filters() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_question(&new_question("science q", 1)).await.unwrap();
        repo.insert_question(&new_question("history q", 2)).await.unwrap();

        let questions = repo.questions_by_category(2).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "history q");

        let none = repo.questions_by_category(999).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_question(&new_question("What is the TITLE of the book?", 1))
            .await
            .unwrap();

        let hits = repo.search_questions("title").await.unwrap();
        assert_eq!(hits.len(), 1);

        let misses = repo.search_questions("xyz-no-match").await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_search_does_not_match_answer_text() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_question(&NewQuestion {
            question: "what color is the sky".to_string(),
            answer: "azure".to_string(),
            category: 1,
            difficulty: 1,
        })
        .await
        .unwrap();

        let hits = repo.search_questions("azure").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_escapes_like_metacharacters() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_question(&new_question("is 100% certain?", 1))
            .await
            .unwrap();
        repo.insert_question(&new_question("is 100 certain?", 1))
            .await
            .unwrap();

        let hits = repo.search_questions("100%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "is 100% certain?");
    }

    #[tokio::test]
    async fn test_quiz_candidates_filter_category_and_exclusions() {
        let (repo, _temp) = setup_test_db().await;

        let q1 = repo.insert_question(&new_question("q1", 1)).await.unwrap();
        let q2 = repo.insert_question(&new_question("q2", 1)).await.unwrap();
        let q3 = repo.insert_question(&new_question("q3", 2)).await.unwrap();

        let all = repo.quiz_candidates(None, &[]).await.unwrap();
        assert_eq!(all.len(), 3);

        let cat1 = repo.quiz_candidates(Some(1), &[q1]).await.unwrap();
        let ids: Vec<i64> = cat1.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![q2]);

        let exhausted = repo.quiz_candidates(None, &[q1, q2, q3]).await.unwrap();
        assert!(exhausted.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let (repo, _temp) = setup_test_db().await;

        let result = repo.delete_question(1000).await;
        assert!(matches!(result, Err(StoreError::QuestionNotFound(1000))));
    }

    #[tokio::test]
    async fn test_categories_round_trip() {
        let (repo, _temp) = setup_test_db().await;

        repo.insert_category("Science").await.unwrap();
        repo.insert_category("History").await.unwrap();

        let categories = repo.all_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].label, "Science");
        assert_eq!(categories[1].label, "History");
        assert!(categories[0].id < categories[1].id);
    }
}
