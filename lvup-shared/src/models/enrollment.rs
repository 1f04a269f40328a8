/// Enrollment model and per-lesson progress records
///
/// An enrollment is a user's registration in a course; its completion state
/// is derived from `lesson_progress` rows, never stored as a percentage
/// (recomputed on every read, see the `progress` module for the math).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE enrollments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     course_id UUID NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
///     enrolled_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     completed_at TIMESTAMPTZ,
///     UNIQUE (user_id, course_id)
/// );
///
/// CREATE TABLE lesson_progress (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     enrollment_id UUID NOT NULL REFERENCES enrollments(id) ON DELETE CASCADE,
///     lesson_id UUID NOT NULL REFERENCES lessons(id) ON DELETE CASCADE,
///     status progress_status NOT NULL DEFAULT 'not_started',
///     completed_at TIMESTAMPTZ,
///     UNIQUE (enrollment_id, lesson_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Per-lesson completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "progress_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Enrollment row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    /// Unique enrollment ID
    pub id: Uuid,

    /// Enrolled user
    pub user_id: Uuid,

    /// Course enrolled in
    pub course_id: Uuid,

    /// When the user enrolled
    pub enrolled_at: DateTime<Utc>,

    /// Set when every lesson is completed
    pub completed_at: Option<DateTime<Utc>>,
}

/// Per-lesson progress row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LessonProgress {
    /// Unique row ID
    pub id: Uuid,

    /// Owning enrollment
    pub enrollment_id: Uuid,

    /// Lesson this records progress for
    pub lesson_id: Uuid,

    /// Completion status
    pub status: ProgressStatus,

    /// When the lesson was completed
    pub completed_at: Option<DateTime<Utc>>,
}

/// Raw lesson counts for one enrollment, input to the percentage math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonCounts {
    /// Lessons in the course
    pub total: i64,

    /// Lessons this enrollment has completed
    pub completed: i64,
}

impl Enrollment {
    /// Enrolls a user in a course
    ///
    /// # Errors
    ///
    /// Fails with a unique-constraint violation when the user is already
    /// enrolled; the API layer maps that to 409.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (user_id, course_id)
            VALUES ($1, $2)
            RETURNING id, user_id, course_id, enrolled_at, completed_at
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
    }

    /// Finds an enrollment by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, enrolled_at, completed_at
            FROM enrollments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Finds a user's enrollment in a given course
    pub async fn find_by_user_and_course(
        pool: &PgPool,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, enrolled_at, completed_at
            FROM enrollments
            WHERE user_id = $1 AND course_id = $2
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a user's enrollments, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, user_id, course_id, enrolled_at, completed_at
            FROM enrollments
            WHERE user_id = $1
            ORDER BY enrolled_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Total vs completed lesson counts for this enrollment
    ///
    /// One query: total lessons of the course, completed rows for the
    /// enrollment. Feeds `progress::progress_percentage`.
    pub async fn lesson_counts(pool: &PgPool, id: Uuid) -> Result<LessonCounts, sqlx::Error> {
        let row: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM lessons l
                 JOIN enrollments e ON e.course_id = l.course_id
                 WHERE e.id = $1),
                (SELECT COUNT(*) FROM lesson_progress lp
                 WHERE lp.enrollment_id = $1 AND lp.status = 'completed')
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(LessonCounts {
            total: row.0,
            completed: row.1,
        })
    }

    /// Marks a lesson completed for this enrollment
    ///
    /// Upserts the progress row; completing an already-completed lesson is a
    /// no-op and keeps the original completion time.
    pub async fn complete_lesson(
        pool: &PgPool,
        enrollment_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<LessonProgress, sqlx::Error> {
        sqlx::query_as::<_, LessonProgress>(
            r#"
            INSERT INTO lesson_progress (enrollment_id, lesson_id, status, completed_at)
            VALUES ($1, $2, 'completed', NOW())
            ON CONFLICT (enrollment_id, lesson_id) DO UPDATE
            SET status = 'completed',
                completed_at = COALESCE(lesson_progress.completed_at, NOW())
            RETURNING id, enrollment_id, lesson_id, status, completed_at
            "#,
        )
        .bind(enrollment_id)
        .bind(lesson_id)
        .fetch_one(pool)
        .await
    }

    /// Stamps the enrollment completed (all lessons done)
    pub async fn mark_completed(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE enrollments SET completed_at = NOW() \
             WHERE id = $1 AND completed_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
