/// Instructor endpoints: public profile page and authoring dashboard
///
/// # Endpoints
///
/// - `GET  /v1/instructors/:id` - Public profile with statistics roll-up
/// - `GET  /v1/instructors/me/revenue` - Revenue summary (20% platform fee)
/// - `GET  /v1/instructors/me/courses` - Own courses, drafts included
/// - `POST /v1/instructors/me/courses` - Create a course (starts in draft)
/// - `POST /v1/instructors/me/courses/:id/lessons` - Add a lesson

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use lvup_shared::{
    auth::{authorization, middleware::AuthContext},
    models::{
        category::Category,
        course::{Course, CourseLevel, CreateCourse},
        instructor::InstructorProfile,
        lesson::{CreateLesson, Lesson},
        order::Order,
        user::User,
    },
    revenue::RevenueSummary,
    stats::InstructorStats,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Public instructor page response
#[derive(Debug, Serialize)]
pub struct InstructorPageResponse {
    /// The profile row
    #[serde(flatten)]
    pub profile: InstructorProfile,

    /// Display name of the owning user
    pub name: Option<String>,

    /// Aggregated statistics over the instructor's courses
    pub stats: InstructorStats,
}

/// Course creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    /// Course title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Long description
    #[validate(length(max = 10000, message = "Description must be at most 10000 characters"))]
    pub description: String,

    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,

    /// Price in KRW
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    /// Free flag
    #[serde(default)]
    pub is_free: bool,

    /// Difficulty, enum name or Korean label
    pub level: String,

    /// Category name
    pub category: Option<String>,
}

/// Lesson creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLessonRequest {
    /// Lesson title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Position within the course
    #[validate(range(min = 0, message = "Order index cannot be negative"))]
    pub order_index: i32,

    /// Video length in seconds
    #[validate(range(min = 0, message = "Duration cannot be negative"))]
    pub duration_seconds: i32,

    /// Free preview flag
    #[serde(default)]
    pub preview: bool,
}

/// Public instructor profile with statistics
pub async fn instructor_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<InstructorPageResponse>> {
    let profile = InstructorProfile::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Instructor not found".to_string()))?;

    let user = User::find_by_id(&state.db, profile.user_id).await?;

    let courses = Course::list_by_instructor(&state.db, profile.id).await?;
    let stats = InstructorStats::from_courses(&courses);

    Ok(Json(InstructorPageResponse {
        name: user.and_then(|u| u.name),
        profile,
        stats,
    }))
}

/// Revenue summary for the calling instructor
///
/// Gross is the sum of paid order amounts over the instructor's courses;
/// the platform keeps a flat 20%.
pub async fn my_revenue(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<RevenueSummary>> {
    let profile_id = authorization::require_instructor_profile(&state.db, &auth).await?;

    let amounts = Order::paid_amounts_by_instructor(&state.db, profile_id).await?;

    Ok(Json(RevenueSummary::from_amounts(&amounts)))
}

/// The calling instructor's courses, drafts included
pub async fn my_courses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Course>>> {
    let profile_id = authorization::require_instructor_profile(&state.db, &auth).await?;

    let courses = Course::list_by_instructor(&state.db, profile_id).await?;

    Ok(Json(courses))
}

/// Create a course in draft status
///
/// The course stays invisible in the catalog until an admin publishes it.
pub async fn create_course(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateCourseRequest>,
) -> ApiResult<Json<Course>> {
    req.validate().map_err(ApiError::from_validation)?;

    let profile_id = authorization::require_instructor_profile(&state.db, &auth).await?;

    let level = CourseLevel::from_label(&req.level)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown level: {}", req.level)))?;

    let category_id = match req.category.as_deref() {
        Some(name) => Some(
            Category::find_by_name(&state.db, name)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Unknown category: {}", name)))?
                .id,
        ),
        None => None,
    };

    let course = Course::create(
        &state.db,
        CreateCourse {
            instructor_id: profile_id,
            category_id,
            title: req.title,
            description: req.description,
            thumbnail_url: req.thumbnail_url,
            price: req.price,
            is_free: req.is_free,
            level,
        },
    )
    .await?;

    Ok(Json(course))
}

/// Add a lesson to an owned course
pub async fn create_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateLessonRequest>,
) -> ApiResult<Json<Lesson>> {
    req.validate().map_err(ApiError::from_validation)?;

    authorization::require_course_ownership(&state.db, &auth, id).await?;

    let lesson = Lesson::create(
        &state.db,
        CreateLesson {
            course_id: id,
            title: req.title,
            order_index: req.order_index,
            duration_seconds: req.duration_seconds,
            preview: req.preview,
        },
    )
    .await?;

    Ok(Json(lesson))
}
