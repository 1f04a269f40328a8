/// Application state and router builder
///
/// Defines the shared `AppState` and assembles the axum router with all
/// routes and middleware.
///
/// # Router Layout
///
/// ```text
/// /
/// ├── /health                          # public
/// └── /v1/
///     ├── /auth/        signup, signin, refresh (public); me (JWT)
///     ├── /courses/     catalog, popular, recommended, detail, reviews, Q&A
///     ├── /users/       profile (JWT), public summary
///     ├── /enrollments/ enroll, my courses, progress, lesson completion (JWT)
///     ├── /orders/      create, list (JWT)
///     ├── /questions/   answers (JWT)
///     ├── /instructors/ public profile; revenue + own courses (JWT)
///     └── /admin/       status transitions, platform stats (JWT + admin)
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch, post},
    Router,
};
use lvup_shared::auth::middleware::jwt_auth_middleware;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request via axum's `State` extractor; `Arc` keeps the clone
/// cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public auth endpoints
    let auth_public = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/signin", post(routes::auth::signin))
        .route("/refresh", post(routes::auth::refresh));

    // Authenticated auth endpoints
    let auth_private = Router::new()
        .route("/me", get(routes::auth::me))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Catalog reads are public; writes (reviews, questions) need a token
    let course_public = Router::new()
        .route("/", get(routes::courses::list_courses))
        .route("/popular", get(routes::courses::popular_courses))
        .route(
            "/recommended/:user_type",
            get(routes::courses::recommended_courses),
        )
        .route("/:id", get(routes::courses::course_detail))
        .route("/:id/reviews", get(routes::courses::list_reviews))
        .route("/:id/questions", get(routes::courses::list_questions));

    let course_private = Router::new()
        .route("/:id/reviews", post(routes::courses::create_review))
        .route("/:id/questions", post(routes::courses::create_question))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let question_routes = Router::new()
        .route("/:id/answers", post(routes::courses::create_answer))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let user_routes = Router::new()
        .route(
            "/profile",
            get(routes::users::get_profile).patch(routes::users::update_profile),
        )
        .route("/:id", get(routes::users::get_user))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let enrollment_routes = Router::new()
        .route(
            "/",
            post(routes::enrollments::enroll).get(routes::enrollments::my_courses),
        )
        .route("/:id/progress", get(routes::enrollments::get_progress))
        .route(
            "/:id/lessons/:lesson_id/complete",
            post(routes::enrollments::complete_lesson),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let order_routes = Router::new()
        .route(
            "/",
            post(routes::orders::create_order).get(routes::orders::my_orders),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Public instructor page; dashboard endpoints behind auth
    let instructor_public =
        Router::new().route("/:id", get(routes::instructors::instructor_profile));

    let instructor_private = Router::new()
        .route("/me/revenue", get(routes::instructors::my_revenue))
        .route(
            "/me/courses",
            get(routes::instructors::my_courses).post(routes::instructors::create_course),
        )
        .route(
            "/me/courses/:id/lessons",
            post(routes::instructors::create_lesson),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let category_routes = Router::new().route("/", get(routes::courses::list_categories));

    let admin_routes = Router::new()
        .route("/categories", post(routes::admin::create_category))
        .route(
            "/courses/:id/status",
            patch(routes::admin::update_course_status),
        )
        .route(
            "/orders/:id/status",
            patch(routes::admin::update_order_status),
        )
        .route("/stats", get(routes::admin::platform_stats))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_public.merge(auth_private))
        .nest("/courses", course_public.merge(course_private))
        .nest("/categories", category_routes)
        .nest("/questions", question_routes)
        .nest("/users", user_routes)
        .nest("/enrollments", enrollment_routes)
        .nest("/orders", order_routes)
        .nest("/instructors", instructor_public.merge(instructor_private))
        .nest("/admin", admin_routes);

    // Permissive CORS in development, explicit origins in production
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Delegates to the shared `jwt_auth_middleware` and maps its error into the
/// API's unified error type.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    jwt_auth_middleware(state.jwt_secret(), req, next)
        .await
        .map_err(crate::error::ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use lvup_shared::{
        auth::jwt,
        models::user::UserRole,
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::Service as _;
    use uuid::Uuid;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn test_state() -> AppState {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/lvup_test".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: SECRET.to_string(),
            },
        };

        // Lazy pool: never connects unless a handler touches the database
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .expect("lazy pool");

        AppState::new(db, config)
    }

    fn protected_app(state: AppState) -> Router {
        Router::new()
            .route("/protected", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                jwt_auth_layer,
            ))
            .with_state(state)
    }

    fn request(auth_header: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = auth_header {
            builder = builder.header(axum::http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let mut app = protected_app(test_state());

        let response = app.call(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_bad_request() {
        let mut app = protected_app(test_state());

        let response = app.call(request(Some("Basic dXNlcg=="))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let mut app = protected_app(test_state());

        let response = app
            .call(request(Some("Bearer not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_token_rejected_on_protected_route() {
        let mut app = protected_app(test_state());

        let claims = jwt::Claims::new(Uuid::new_v4(), UserRole::Student, jwt::TokenType::Refresh);
        let token = jwt::create_token(&claims, SECRET).unwrap();

        let response = app
            .call(request(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_access_token_passes() {
        let mut app = protected_app(test_state());

        let claims = jwt::Claims::new(Uuid::new_v4(), UserRole::Student, jwt::TokenType::Access);
        let token = jwt::create_token(&claims, SECRET).unwrap();

        let response = app
            .call(request(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
