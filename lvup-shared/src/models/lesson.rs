/// Lesson model
///
/// Lessons are ordered units within a course. Progress is tracked per
/// enrollment in `lesson_progress`, not on the lesson row itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Lesson row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lesson {
    /// Unique lesson ID
    pub id: Uuid,

    /// Owning course
    pub course_id: Uuid,

    /// Lesson title
    pub title: String,

    /// Position within the course
    pub order_index: i32,

    /// Video length in seconds
    pub duration_seconds: i32,

    /// Whether the lesson is watchable without enrolling
    pub preview: bool,

    /// When the lesson was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a lesson
#[derive(Debug, Clone)]
pub struct CreateLesson {
    /// Owning course
    pub course_id: Uuid,

    /// Title
    pub title: String,

    /// Position within the course
    pub order_index: i32,

    /// Video length in seconds
    pub duration_seconds: i32,

    /// Free preview flag
    pub preview: bool,
}

impl Lesson {
    /// Creates a lesson
    pub async fn create(pool: &PgPool, data: CreateLesson) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Lesson>(
            r#"
            INSERT INTO lessons (course_id, title, order_index, duration_seconds, preview)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, course_id, title, order_index, duration_seconds, preview, created_at
            "#,
        )
        .bind(data.course_id)
        .bind(data.title)
        .bind(data.order_index)
        .bind(data.duration_seconds)
        .bind(data.preview)
        .fetch_one(pool)
        .await
    }

    /// Finds a lesson by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, course_id, title, order_index, duration_seconds, preview, created_at
            FROM lessons
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a course's lessons in order
    pub async fn list_by_course(pool: &PgPool, course_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, course_id, title, order_index, duration_seconds, preview, created_at
            FROM lessons
            WHERE course_id = $1
            ORDER BY order_index, created_at
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }
}
