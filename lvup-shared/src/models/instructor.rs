/// Instructor profile model
///
/// An instructor profile is an extension row over `users` that grants
/// course-authoring capability. Courses reference the profile, not the user,
/// so a user can be deleted from public view while their catalog history
/// stays consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Instructor profile row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InstructorProfile {
    /// Unique profile ID (referenced by courses)
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Short biography shown on the instructor page
    pub bio: Option<String>,

    /// Career / credentials text
    pub career: Option<String>,

    /// Set by admins after identity review
    pub verified: bool,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an instructor profile
#[derive(Debug, Clone, Default)]
pub struct CreateInstructorProfile {
    /// Owning user
    pub user_id: Uuid,

    /// Optional biography
    pub bio: Option<String>,

    /// Optional career text
    pub career: Option<String>,
}

impl InstructorProfile {
    /// Creates a profile for a user
    ///
    /// Fails with a unique violation if the user already has one.
    pub async fn create(
        pool: &PgPool,
        data: CreateInstructorProfile,
    ) -> Result<Self, sqlx::Error> {
        let profile = sqlx::query_as::<_, InstructorProfile>(
            r#"
            INSERT INTO instructor_profiles (user_id, bio, career)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, bio, career, verified, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.bio)
        .bind(data.career)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by its ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, InstructorProfile>(
            r#"
            SELECT id, user_id, bio, career, verified, created_at, updated_at
            FROM instructor_profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Finds the profile belonging to a user
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, InstructorProfile>(
            r#"
            SELECT id, user_id, bio, career, verified, created_at, updated_at
            FROM instructor_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
