/// Enrollment and learning-progress endpoints
///
/// # Endpoints
///
/// - `POST /v1/enrollments` - Enroll in a published course
/// - `GET  /v1/enrollments` - My courses with progress
/// - `GET  /v1/enrollments/:id/progress` - Progress detail
/// - `POST /v1/enrollments/:id/lessons/:lesson_id/complete` - Mark lesson done

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
    models::{
        course::{Course, CourseStatus},
        enrollment::{Enrollment, LessonProgress},
        lesson::Lesson,
    },
    progress::ProgressReport,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Enrollment request
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// Course to enroll in
    pub course_id: Uuid,
}

/// Enrollment with its derived progress
#[derive(Debug, Serialize)]
pub struct EnrollmentWithProgress {
    /// The enrollment row
    #[serde(flatten)]
    pub enrollment: Enrollment,

    /// Derived progress (never stored, recomputed per read)
    pub progress: ProgressReport,
}

/// Lesson completion response
#[derive(Debug, Serialize)]
pub struct CompleteLessonResponse {
    /// The upserted progress row
    pub lesson_progress: LessonProgress,

    /// Enrollment progress after this completion
    pub progress: ProgressReport,
}

/// Enroll the caller in a course
///
/// Free courses enroll directly. Paid courses also enroll directly here;
/// payment is tracked separately through orders (the original flow lets
/// users start paid courses before the gateway confirms).
///
/// # Errors
///
/// - `404 Not Found`: Unknown or unpublished course
/// - `409 Conflict`: Already enrolled
pub async fn enroll(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<EnrollRequest>,
) -> ApiResult<Json<Enrollment>> {
    let course = Course::find_by_id(&state.db, req.course_id)
        .await?
        .filter(|c| c.status == CourseStatus::Published)
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let enrollment = Enrollment::create(&state.db, auth.user_id, course.id).await?;

    Course::increment_enrollment_count(&state.db, course.id).await?;

    Ok(Json(enrollment))
}

/// My enrollments with progress, newest first
pub async fn my_courses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<EnrollmentWithProgress>>> {
    let enrollments = Enrollment::list_by_user(&state.db, auth.user_id).await?;

    let mut result = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let counts = Enrollment::lesson_counts(&state.db, enrollment.id).await?;
        result.push(EnrollmentWithProgress {
            enrollment,
            progress: ProgressReport::from_counts(counts),
        });
    }

    Ok(Json(result))
}

/// Progress detail for one enrollment, including certificate eligibility
pub async fn get_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<EnrollmentWithProgress>> {
    let enrollment = owned_enrollment(&state, id, &auth).await?;

    let counts = Enrollment::lesson_counts(&state.db, enrollment.id).await?;

    Ok(Json(EnrollmentWithProgress {
        enrollment,
        progress: ProgressReport::from_counts(counts),
    }))
}

/// Mark a lesson completed for an enrollment
///
/// Idempotent: completing an already-completed lesson keeps the original
/// completion time. When the last lesson is done the enrollment itself is
/// stamped completed.
///
/// # Errors
///
/// - `404 Not Found`: Unknown enrollment or lesson, or lesson from another
///   course
pub async fn complete_lesson(
    State(state): State<AppState>,
    Path((id, lesson_id)): Path<(Uuid, Uuid)>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<CompleteLessonResponse>> {
    let enrollment = owned_enrollment(&state, id, &auth).await?;

    let lesson = Lesson::find_by_id(&state.db, lesson_id)
        .await?
        .filter(|l| l.course_id == enrollment.course_id)
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    let lesson_progress = Enrollment::complete_lesson(&state.db, enrollment.id, lesson.id).await?;

    let counts = Enrollment::lesson_counts(&state.db, enrollment.id).await?;
    let progress = ProgressReport::from_counts(counts);

    if progress.is_complete() {
        Enrollment::mark_completed(&state.db, enrollment.id).await?;
    }

    Ok(Json(CompleteLessonResponse {
        lesson_progress,
        progress,
    }))
}

/// Loads an enrollment and checks the caller owns it
///
/// Other users' enrollments answer 404, not 403, so enrollment IDs leak
/// nothing.
async fn owned_enrollment(
    state: &AppState,
    id: Uuid,
    auth: &AuthContext,
) -> Result<Enrollment, ApiError> {
    Enrollment::find_by_id(&state.db, id)
        .await?
        .filter(|e| e.user_id == auth.user_id)
        .ok_or_else(|| ApiError::NotFound("Enrollment not found".to_string()))
}
