/// Enrollment progress math
///
/// The percentage is derived from lesson counts on every read; it is never
/// stored. Certificate eligibility is a fixed threshold over the same
/// number.
///
/// # Example
///
/// ```
/// use lvup_shared::progress::{progress_percentage, can_get_certificate};
///
/// assert_eq!(progress_percentage(9, 10), 90);
/// assert!(can_get_certificate(9, 10));
/// assert!(!can_get_certificate(8, 10));
/// ```

use crate::models::enrollment::LessonCounts;

/// Completion percentage required for a certificate
pub const CERTIFICATE_THRESHOLD: i32 = 90;

/// Progress percentage: `round(completed / total * 100)`
///
/// A course with no lessons yields 0, not a division error. Completed is
/// clamped to total so stale progress rows can never exceed 100.
pub fn progress_percentage(completed: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }

    let completed = completed.clamp(0, total);
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

/// Whether the completion percentage earns a certificate (≥ 90%)
pub fn can_get_certificate(completed: i64, total: i64) -> bool {
    progress_percentage(completed, total) >= CERTIFICATE_THRESHOLD
}

/// Computed progress for one enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ProgressReport {
    /// Lessons in the course
    pub total_lessons: i64,

    /// Lessons completed under this enrollment
    pub completed_lessons: i64,

    /// Rounded completion percentage
    pub progress_percentage: i32,

    /// Whether the 90% certificate threshold is met
    pub can_get_certificate: bool,
}

impl ProgressReport {
    /// Builds a report from raw lesson counts
    pub fn from_counts(counts: LessonCounts) -> Self {
        let pct = progress_percentage(counts.completed, counts.total);

        Self {
            total_lessons: counts.total,
            completed_lessons: counts.completed,
            progress_percentage: pct,
            can_get_certificate: pct >= CERTIFICATE_THRESHOLD,
        }
    }

    /// Whether every lesson is done (used to stamp `completed_at`)
    pub fn is_complete(&self) -> bool {
        self.total_lessons > 0 && self.completed_lessons >= self.total_lessons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_basic() {
        assert_eq!(progress_percentage(0, 10), 0);
        assert_eq!(progress_percentage(5, 10), 50);
        assert_eq!(progress_percentage(10, 10), 100);
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(1, 7), 14);
        assert_eq!(progress_percentage(1, 8), 13); // 12.5 rounds to 13
    }

    #[test]
    fn test_empty_course_is_zero() {
        assert_eq!(progress_percentage(0, 0), 0);
        assert_eq!(progress_percentage(5, 0), 0);
        assert!(!can_get_certificate(0, 0));
    }

    #[test]
    fn test_completed_clamped_to_total() {
        // Stale progress rows after lessons are removed
        assert_eq!(progress_percentage(12, 10), 100);
        assert_eq!(progress_percentage(-1, 10), 0);
    }

    #[test]
    fn test_certificate_threshold() {
        // 9 of 10 lessons: 90%, eligible
        assert!(can_get_certificate(9, 10));
        // 8 of 10: 80%, not eligible
        assert!(!can_get_certificate(8, 10));
        // 89.4% rounds to 89: not eligible
        assert!(!can_get_certificate(151, 169));
        // 89.5% rounds to 90: eligible
        assert!(can_get_certificate(179, 200));
    }

    #[test]
    fn test_report_from_counts() {
        let report = ProgressReport::from_counts(LessonCounts {
            total: 10,
            completed: 9,
        });

        assert_eq!(report.progress_percentage, 90);
        assert!(report.can_get_certificate);
        assert!(!report.is_complete());

        let done = ProgressReport::from_counts(LessonCounts {
            total: 10,
            completed: 10,
        });
        assert!(done.is_complete());
    }
}
