/// Admin endpoints: guarded status transitions and platform statistics
///
/// Every handler requires the admin role.
///
/// # Endpoints
///
/// - `POST  /v1/admin/categories` - Create a category
/// - `PATCH /v1/admin/courses/:id/status` - Course status transition
/// - `PATCH /v1/admin/orders/:id/status` - Order status transition
/// - `GET   /v1/admin/stats` - Platform totals

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
        course::{Course, CourseStatus},
        order::{Order, OrderStatus},
        user::{User, UserRole},
    },
    revenue::RevenueSummary,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Category creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// URL slug
    #[validate(length(min = 1, max = 100, message = "Slug must be 1-100 characters"))]
    pub slug: String,
}

/// Course status update request
#[derive(Debug, Deserialize)]
pub struct UpdateCourseStatusRequest {
    /// Target status
    pub status: CourseStatus,
}

/// Order status update request
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    /// Target status
    pub status: OrderStatus,
}

/// Platform statistics response
#[derive(Debug, Serialize)]
pub struct PlatformStatsResponse {
    /// Registered users
    pub total_users: i64,

    /// Courses, all statuses
    pub total_courses: i64,

    /// Gross/fee/net over all paid orders
    pub revenue: RevenueSummary,
}

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<Json<Category>> {
    authorization::require_role(&auth, UserRole::Admin)?;
    req.validate().map_err(ApiError::from_validation)?;

    let category = Category::create(&state.db, &req.name, &req.slug).await?;

    Ok(Json(category))
}

/// Move a course through its status machine
///
/// Legal transitions: draft→published, published→archived,
/// archived→published.
///
/// # Errors
///
/// - `409 Conflict`: Illegal transition
pub async fn update_course_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateCourseStatusRequest>,
) -> ApiResult<Json<Course>> {
    authorization::require_role(&auth, UserRole::Admin)?;

    let course = Course::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    if !course.status.can_transition_to(req.status) {
        return Err(ApiError::Conflict(format!(
            "Cannot transition course from {} to {}",
            course.status.as_str(),
            req.status.as_str()
        )));
    }

    let updated = Course::set_status(&state.db, id, req.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    Ok(Json(updated))
}

/// Move an order through its status machine
///
/// Legal transitions: pending→paid, pending→cancelled, paid→refunded.
///
/// # Errors
///
/// - `409 Conflict`: Illegal transition
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> ApiResult<Json<Order>> {
    authorization::require_role(&auth, UserRole::Admin)?;

    let order = Order::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    if !order.status.can_transition_to(req.status) {
        return Err(ApiError::Conflict(format!(
            "Cannot transition order from {} to {}",
            order.status.as_str(),
            req.status.as_str()
        )));
    }

    let updated = Order::set_status(&state.db, id, req.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    Ok(Json(updated))
}

/// Platform totals for the admin dashboard
pub async fn platform_stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<PlatformStatsResponse>> {
    authorization::require_role(&auth, UserRole::Admin)?;

    let total_users = User::count(&state.db).await?;
    let total_courses = Course::count(&state.db).await?;
    let (order_count, gross) = Order::paid_totals(&state.db).await?;

    let fee = lvup_shared::revenue::platform_fee(gross);

    Ok(Json(PlatformStatsResponse {
        total_users,
        total_courses,
        revenue: RevenueSummary {
            order_count,
            gross,
            fee,
            net: gross - fee,
        },
    }))
}
