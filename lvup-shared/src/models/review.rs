/// Review model
///
/// Reviews hang off enrollments (one per enrollment) so only enrolled users
/// can review and a user cannot review the same course twice. The course's
/// denormalized rating is refreshed after every write via
/// `Course::refresh_rating`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Review row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    /// Unique review ID
    pub id: Uuid,

    /// Enrollment this review belongs to (unique)
    pub enrollment_id: Uuid,

    /// Star rating, 1 to 5
    pub rating: i32,

    /// Review text
    pub content: String,

    /// When the review was created
    pub created_at: DateTime<Utc>,

    /// When the review was last updated
    pub updated_at: DateTime<Utc>,
}

/// Review joined with the reviewer's name, for course pages
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseReview {
    /// Review ID
    pub id: Uuid,

    /// Star rating
    pub rating: i32,

    /// Review text
    pub content: String,

    /// Reviewer display name
    pub user_name: Option<String>,

    /// When the review was created
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a review for an enrollment
    ///
    /// # Errors
    ///
    /// Fails with a unique violation when the enrollment already has a
    /// review, or a check violation when the rating is outside 1..=5.
    pub async fn create(
        pool: &PgPool,
        enrollment_id: Uuid,
        rating: i32,
        content: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (enrollment_id, rating, content)
            VALUES ($1, $2, $3)
            RETURNING id, enrollment_id, rating, content, created_at, updated_at
            "#,
        )
        .bind(enrollment_id)
        .bind(rating)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// Lists a course's reviews with reviewer names, newest first
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: Uuid,
    ) -> Result<Vec<CourseReview>, sqlx::Error> {
        sqlx::query_as::<_, CourseReview>(
            r#"
            SELECT r.id, r.rating, r.content, u.name AS user_name, r.created_at
            FROM reviews r
            JOIN enrollments e ON e.id = r.enrollment_id
            JOIN users u ON u.id = e.user_id
            WHERE e.course_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await
    }
}
