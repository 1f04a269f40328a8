/// Authorization checks
///
/// Role gating plus resource-level ownership checks. Roles come from the
/// access token (via `AuthContext`); ownership checks hit the database.

use sqlx::PgPool;
use uuid::Uuid;

use super::middleware::AuthContext;
use crate::models::{instructor::InstructorProfile, user::UserRole};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Caller's role is insufficient
    #[error("Insufficient permissions: requires {required:?}, has {actual:?}")]
    InsufficientRole {
        required: UserRole,
        actual: UserRole,
    },

    /// Caller is not an instructor
    #[error("No instructor profile for user {0}")]
    NotAnInstructor(Uuid),

    /// Caller does not own the resource
    #[error("Not authorized to access this resource")]
    NotAuthorized,

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Requires the caller to be able to act as `required`
///
/// Admin satisfies every requirement; instructor satisfies student and
/// instructor requirements.
pub fn require_role(auth: &AuthContext, required: UserRole) -> Result<(), AuthzError> {
    if auth.can_act_as(required) {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole {
            required,
            actual: auth.role,
        })
    }
}

/// Resolves the caller's instructor profile id
///
/// # Errors
///
/// Returns `AuthzError::NotAnInstructor` when no profile row exists for the
/// user, regardless of the role claim on the token.
pub async fn require_instructor_profile(
    pool: &PgPool,
    auth: &AuthContext,
) -> Result<Uuid, AuthzError> {
    require_role(auth, UserRole::Instructor)?;

    let profile = InstructorProfile::find_by_user_id(pool, auth.user_id).await?;

    profile
        .map(|p| p.id)
        .ok_or(AuthzError::NotAnInstructor(auth.user_id))
}

/// Checks that the caller's instructor profile owns the given course
pub async fn require_course_ownership(
    pool: &PgPool,
    auth: &AuthContext,
    course_id: Uuid,
) -> Result<(), AuthzError> {
    if auth.role == UserRole::Admin {
        return Ok(());
    }

    let profile_id = require_instructor_profile(pool, auth).await?;

    let owns: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM courses WHERE id = $1 AND instructor_id = $2")
            .bind(course_id)
            .bind(profile_id)
            .fetch_optional(pool)
            .await?;

    if owns.is_some() {
        Ok(())
    } else {
        Err(AuthzError::NotAuthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: UserRole) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&ctx(UserRole::Student), UserRole::Student).is_ok());
        assert!(require_role(&ctx(UserRole::Instructor), UserRole::Instructor).is_ok());
        assert!(require_role(&ctx(UserRole::Admin), UserRole::Instructor).is_ok());

        let err = require_role(&ctx(UserRole::Student), UserRole::Admin).unwrap_err();
        assert!(matches!(err, AuthzError::InsufficientRole { .. }));
    }
}
