/// Course Q&A models
///
/// Questions are posted on a course page; answers hang off questions. An
/// answer by the course's instructor can be marked accepted, which also
/// resolves the question.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Question row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    /// Unique question ID
    pub id: Uuid,

    /// Course the question is about
    pub course_id: Uuid,

    /// Asking user
    pub user_id: Uuid,

    /// Question title
    pub title: String,

    /// Question body
    pub content: String,

    /// Whether an answer has been accepted
    pub resolved: bool,

    /// When the question was created
    pub created_at: DateTime<Utc>,

    /// When the question was last updated
    pub updated_at: DateTime<Utc>,
}

/// Answer row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    /// Unique answer ID
    pub id: Uuid,

    /// Question being answered
    pub question_id: Uuid,

    /// Answering user
    pub user_id: Uuid,

    /// Answer body
    pub content: String,

    /// Marked as the accepted answer
    pub accepted: bool,

    /// When the answer was created
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Posts a question on a course
    pub async fn create(
        pool: &PgPool,
        course_id: Uuid,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (course_id, user_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, course_id, user_id, title, content, resolved,
                      created_at, updated_at
            "#,
        )
        .bind(course_id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// Finds a question by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, course_id, user_id, title, content, resolved,
                   created_at, updated_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a course's questions, newest first
    pub async fn list_by_course(pool: &PgPool, course_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, course_id, user_id, title, content, resolved,
                   created_at, updated_at
            FROM questions
            WHERE course_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }
}

impl Answer {
    /// Posts an answer to a question
    pub async fn create(
        pool: &PgPool,
        question_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Answer>(
            r#"
            INSERT INTO answers (question_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, question_id, user_id, content, accepted, created_at
            "#,
        )
        .bind(question_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// Lists a question's answers, oldest first
    pub async fn list_by_question(
        pool: &PgPool,
        question_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, question_id, user_id, content, accepted, created_at
            FROM answers
            WHERE question_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(question_id)
        .fetch_all(pool)
        .await
    }
}
