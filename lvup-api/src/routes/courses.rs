/// Course catalog, reviews, Q&A and category endpoints
///
/// # Endpoints
///
/// - `GET  /v1/courses` - Filtered, paginated catalog
/// - `GET  /v1/courses/popular` - Most-enrolled published courses
/// - `GET  /v1/courses/recommended/:user_type` - Level-matched picks
/// - `GET  /v1/courses/:id` - Course detail with lessons
/// - `GET  /v1/courses/:id/reviews` / `POST ...` - Reviews
/// - `GET  /v1/courses/:id/questions` / `POST ...` - Q&A board
/// - `POST /v1/questions/:id/answers` - Answer a question
/// - `GET  /v1/categories` - Category list

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use lvup_shared::{
    auth::middleware::AuthContext,
    catalog::CourseFilter,
    models::{
        category::Category,
        course::{Course, CourseLevel, CourseStatus, CourseSummary},
        enrollment::Enrollment,
        lesson::Lesson,
        question::{Answer, Question},
        review::{CourseReview, Review},
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Default size of the popular and recommended lists
const FEATURED_LIMIT: i64 = 10;

/// Paginated catalog response
#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    /// Courses on this page
    pub items: Vec<CourseSummary>,

    /// Total matches across all pages
    pub total: i64,

    /// Effective page number
    pub page: u32,

    /// Effective page size
    pub limit: u32,
}

/// Course detail response
#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    /// Course with category and instructor names
    #[serde(flatten)]
    pub course: CourseSummary,

    /// Lessons in order
    pub lessons: Vec<Lesson>,
}

/// Review creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    /// Star rating, 1 to 5
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    /// Review text
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

/// Question creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    /// Question title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Question body
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,
}

/// Answer creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnswerRequest {
    /// Answer body
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,
}

/// Question with its answers
#[derive(Debug, Serialize)]
pub struct QuestionWithAnswers {
    /// The question
    #[serde(flatten)]
    pub question: Question,

    /// Answers, oldest first
    pub answers: Vec<Answer>,
}

/// Filtered, paginated course catalog
///
/// Query parameters: `category`, `level` (enum name or Korean label),
/// `is_paid`, `search`, `page`, `limit`. Only published courses appear.
///
/// # Example
///
/// ```text
/// GET /v1/courses?category=요가&level=초급&is_paid=true&page=1&limit=12
/// ```
pub async fn list_courses(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> ApiResult<Json<CourseListResponse>> {
    let (items, total) = Course::search(&state.db, &filter).await?;

    Ok(Json(CourseListResponse {
        items,
        total,
        page: filter.page(),
        limit: filter.limit(),
    }))
}

/// Most-enrolled published courses
pub async fn popular_courses(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CourseSummary>>> {
    let courses = Course::popular(&state.db, FEATURED_LIMIT).await?;

    Ok(Json(courses))
}

/// Level-matched recommendations
///
/// The path segment is a user type that maps onto a course level: the same
/// labels the catalog accepts (`beginner`/`초급` and so on).
pub async fn recommended_courses(
    State(state): State<AppState>,
    Path(user_type): Path<String>,
) -> ApiResult<Json<Vec<CourseSummary>>> {
    let level = CourseLevel::from_label(&user_type)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown user type: {}", user_type)))?;

    let courses = Course::by_level(&state.db, level, FEATURED_LIMIT).await?;

    Ok(Json(courses))
}

/// Course detail with its lessons
///
/// Draft courses are visible only through the instructor dashboard, so an
/// unpublished ID behaves like an unknown one here.
pub async fn course_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CourseDetailResponse>> {
    let course = Course::find_by_id(&state.db, id)
        .await?
        .filter(|c| c.status == CourseStatus::Published)
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let summary = Course::find_summary(&state.db, course.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    let lessons = Lesson::list_by_course(&state.db, course.id).await?;

    Ok(Json(CourseDetailResponse {
        course: summary,
        lessons,
    }))
}

/// Course reviews, newest first
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<CourseReview>>> {
    if Course::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let reviews = Review::list_by_course(&state.db, id).await?;

    Ok(Json(reviews))
}

/// Post a review on a course
///
/// The caller must be enrolled; one review per enrollment.
///
/// # Errors
///
/// - `403 Forbidden`: Not enrolled in the course
/// - `409 Conflict`: Already reviewed
pub async fn create_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateReviewRequest>,
) -> ApiResult<Json<Review>> {
    req.validate().map_err(ApiError::from_validation)?;

    let enrollment = Enrollment::find_by_user_and_course(&state.db, auth.user_id, id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Must be enrolled to review".to_string()))?;

    let review = Review::create(&state.db, enrollment.id, req.rating, &req.content).await?;

    // Keep the denormalized rating in sync
    Course::refresh_rating(&state.db, id).await?;

    Ok(Json(review))
}

/// Course Q&A board with answers, newest question first
pub async fn list_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<QuestionWithAnswers>>> {
    if Course::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let questions = Question::list_by_course(&state.db, id).await?;

    let mut board = Vec::with_capacity(questions.len());
    for question in questions {
        let answers = Answer::list_by_question(&state.db, question.id).await?;
        board.push(QuestionWithAnswers { question, answers });
    }

    Ok(Json(board))
}

/// Post a question on a course
pub async fn create_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateQuestionRequest>,
) -> ApiResult<Json<Question>> {
    req.validate().map_err(ApiError::from_validation)?;

    if Course::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Course not found".to_string()));
    }

    let question =
        Question::create(&state.db, id, auth.user_id, &req.title, &req.content).await?;

    Ok(Json(question))
}

/// Answer a question
pub async fn create_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateAnswerRequest>,
) -> ApiResult<Json<Answer>> {
    req.validate().map_err(ApiError::from_validation)?;

    if Question::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Question not found".to_string()));
    }

    let answer = Answer::create(&state.db, id, auth.user_id, &req.content).await?;

    Ok(Json(answer))
}

/// Category list, alphabetical
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = Category::list(&state.db).await?;

    Ok(Json(categories))
}
