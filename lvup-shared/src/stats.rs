/// Instructor statistics roll-up
///
/// Aggregates an instructor's courses into the numbers shown on their
/// public page and dashboard: total students, total reviews, and the mean
/// of per-course ratings with unrated courses filtered out.

use serde::Serialize;

use crate::models::course::Course;

/// Aggregated statistics over an instructor's courses
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InstructorStats {
    /// Number of courses (drafts included)
    pub total_courses: i64,

    /// Sum of enrollment counts
    pub total_students: i64,

    /// Sum of review counts
    pub total_reviews: i64,

    /// Mean of per-course average ratings, courses with no rating excluded
    pub average_rating: f32,
}

impl InstructorStats {
    /// Rolls up a list of courses
    ///
    /// Courses with `average_rating <= 0` (unrated) are excluded from the
    /// mean so a stack of new courses cannot drag a rating down to zero.
    pub fn from_courses(courses: &[Course]) -> Self {
        let total_students = courses.iter().map(|c| c.enrollment_count).sum();
        let total_reviews = courses.iter().map(|c| c.review_count).sum();

        let rated: Vec<f32> = courses
            .iter()
            .map(|c| c.average_rating)
            .filter(|r| *r > 0.0)
            .collect();

        let average_rating = if rated.is_empty() {
            0.0
        } else {
            rated.iter().sum::<f32>() / rated.len() as f32
        };

        Self {
            total_courses: courses.len() as i64,
            total_students,
            total_reviews,
            average_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::course::{CourseLevel, CourseStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn course(enrollments: i64, rating: f32, reviews: i64) -> Course {
        Course {
            id: Uuid::new_v4(),
            instructor_id: Uuid::new_v4(),
            category_id: None,
            title: "t".to_string(),
            description: String::new(),
            thumbnail_url: None,
            price: 0,
            is_free: true,
            level: CourseLevel::Beginner,
            status: CourseStatus::Published,
            enrollment_count: enrollments,
            average_rating: rating,
            review_count: reviews,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_rollup_sums_and_mean() {
        let courses = vec![course(100, 4.0, 20), course(50, 5.0, 10)];
        let stats = InstructorStats::from_courses(&courses);

        assert_eq!(stats.total_courses, 2);
        assert_eq!(stats.total_students, 150);
        assert_eq!(stats.total_reviews, 30);
        assert!((stats.average_rating - 4.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unrated_courses_excluded_from_mean() {
        let courses = vec![course(10, 0.0, 0), course(20, 4.0, 5), course(5, 0.0, 0)];
        let stats = InstructorStats::from_courses(&courses);

        assert_eq!(stats.total_students, 35);
        assert!((stats.average_rating - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_courses() {
        let stats = InstructorStats::from_courses(&[]);
        assert_eq!(stats, InstructorStats::default());
    }

    #[test]
    fn test_all_unrated_yields_zero() {
        let courses = vec![course(10, 0.0, 0)];
        let stats = InstructorStats::from_courses(&courses);

        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total_students, 10);
    }
}
