/// Order endpoints
///
/// Orders record purchases of paid courses; actual payment capture happens
/// at an external gateway and is out of scope here.
///
/// # Endpoints
///
/// - `POST /v1/orders` - Create a pending order
/// - `GET  /v1/orders` - My orders

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use lvup_shared::{
    auth::middleware::AuthContext,
    models::{
        course::{Course, CourseStatus},
        order::Order,
    },
};
use serde::Deserialize;
use uuid::Uuid;

/// Order creation request
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Course to purchase
    pub course_id: Uuid,
}

/// Create a pending order for a paid course
///
/// The amount is captured from the course price at order time, so later
/// price changes do not affect open orders.
///
/// # Errors
///
/// - `400 Bad Request`: Course is free, nothing to order
/// - `404 Not Found`: Unknown or unpublished course
pub async fn create_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateOrderRequest>,
) -> ApiResult<Json<Order>> {
    let course = Course::find_by_id(&state.db, req.course_id)
        .await?
        .filter(|c| c.status == CourseStatus::Published)
        .ok_or_else(|| ApiError::NotFound("Course not found".to_string()))?;

    if !course.is_paid() {
        return Err(ApiError::BadRequest(
            "Course is free, enroll directly".to_string(),
        ));
    }

    let order = Order::create(&state.db, auth.user_id, course.id, course.price).await?;

    Ok(Json(order))
}

/// My orders, newest first
pub async fn my_orders(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = Order::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(orders))
}
