/// Route handlers
///
/// One module per resource:
/// - `health`: service health check
/// - `auth`: signup, signin, token refresh, current user
/// - `courses`: catalog, course detail, reviews, Q&A, categories
/// - `users`: profile management and public summaries
/// - `enrollments`: enrollment, progress, lesson completion
/// - `orders`: order creation and listing
/// - `instructors`: public profile, revenue dashboard, course authoring
/// - `admin`: status transitions and platform statistics

pub mod admin;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod health;
pub mod instructors;
pub mod orders;
pub mod users;
