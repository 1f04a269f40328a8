/// User profile endpoints
///
/// # Endpoints
///
/// - `GET   /v1/users/profile` - Own profile
/// - `PATCH /v1/users/profile` - Update own profile
/// - `GET   /v1/users/:id` - Public user summary

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use lvup_shared::{
    auth::middleware::AuthContext,
    models::user::{UpdateUser, User, UserRole},
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::auth::MeResponse;

/// Keeps the absent-vs-null distinction when deserializing nullable fields
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Profile update request
///
/// Fields are three-valued: absent leaves the column alone, `null` clears
/// it, a string sets it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<Option<String>>,

    /// New avatar URL
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 512, message = "Avatar URL must be at most 512 characters"))]
    pub avatar_url: Option<Option<String>>,
}

/// Public user summary, safe to show to anyone
#[derive(Debug, Serialize)]
pub struct PublicUserResponse {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: Option<String>,

    /// Avatar URL
    pub avatar_url: Option<String>,

    /// Account role
    pub role: UserRole,
}

/// Own profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MeResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Update own profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<MeResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = User::update(
        &state.db,
        auth.user_id,
        UpdateUser {
            name: req.name,
            avatar_url: req.avatar_url,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Public summary of any user
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PublicUserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(PublicUserResponse {
        id: user.id,
        name: user.name,
        avatar_url: user.avatar_url,
        role: user.role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile_request_bounds() {
        let req = UpdateProfileRequest {
            name: Some(Some("Kim Coach".to_string())),
            avatar_url: Some(Some("https://cdn.example.com/avatar.png".to_string())),
        };
        assert!(req.validate().is_ok());

        let req = UpdateProfileRequest {
            name: Some(Some("x".repeat(101))),
            avatar_url: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateProfileRequest {
            name: Some(Some(String::new())),
            avatar_url: None,
        };
        assert!(req.validate().is_err());

        let req = UpdateProfileRequest {
            name: None,
            avatar_url: Some(Some("x".repeat(513))),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_profile_request_clearing_fields_is_valid() {
        // Explicit nulls clear the columns; nothing to length-check
        let req = UpdateProfileRequest {
            name: Some(None),
            avatar_url: Some(None),
        };
        assert!(req.validate().is_ok());

        let req = UpdateProfileRequest {
            name: None,
            avatar_url: None,
        };
        assert!(req.validate().is_ok());
    }
}
