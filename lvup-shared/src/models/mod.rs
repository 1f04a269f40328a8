/// Database models
///
/// Row structs and their CRUD operations, one module per table group:
///
/// - `user`: accounts and roles
/// - `instructor`: instructor profiles
/// - `category`: course categories
/// - `course`: courses, catalog search, status machine
/// - `lesson`: ordered lessons within a course
/// - `enrollment`: enrollments and per-lesson progress records
/// - `order`: purchase orders and their status machine
/// - `review`: course reviews
/// - `question`: course Q&A

pub mod category;
pub mod course;
pub mod enrollment;
pub mod instructor;
pub mod lesson;
pub mod order;
pub mod question;
pub mod review;
pub mod user;
