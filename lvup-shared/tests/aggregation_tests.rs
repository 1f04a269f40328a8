/// Black-box tests over the aggregation surface: catalog filters, progress
/// percentages, revenue arithmetic and the instructor statistics roll-up.
///
/// These exercise the public API only and need no database.

use chrono::Utc;
use lvup_shared::catalog::{CourseFilter, DEFAULT_LIMIT, MAX_LIMIT};
use lvup_shared::models::course::{Course, CourseLevel, CourseStatus};
use lvup_shared::models::enrollment::LessonCounts;
use lvup_shared::progress::{can_get_certificate, progress_percentage, ProgressReport};
use lvup_shared::revenue::{net_revenue, platform_fee, RevenueSummary};
use lvup_shared::stats::InstructorStats;
use uuid::Uuid;

fn course(
    price: i64,
    is_free: bool,
    enrollments: i64,
    rating: f32,
    reviews: i64,
) -> Course {
    Course {
        id: Uuid::new_v4(),
        instructor_id: Uuid::new_v4(),
        category_id: None,
        title: "필라테스 기초".to_string(),
        description: "코어 강화 입문 강의".to_string(),
        thumbnail_url: None,
        price,
        is_free,
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
fn catalog_filter_pagination_contract() {
    // Defaults: page 1, limit 12, offset 0
    let filter = CourseFilter::default();
    assert_eq!(filter.page(), 1);
    assert_eq!(filter.limit(), DEFAULT_LIMIT);
    assert_eq!(filter.offset(), 0);

    // offset = (page - 1) * limit
    let filter = CourseFilter {
        page: Some(4),
        limit: Some(12),
        ..Default::default()
    };
    assert_eq!(filter.offset(), 36);

    // Oversized limits are clamped
    let filter = CourseFilter {
        limit: Some(1_000),
        ..Default::default()
    };
    assert_eq!(filter.limit(), MAX_LIMIT);
}

#[test]
fn catalog_filter_level_labels() {
    for (label, expected) in [
        ("초급", CourseLevel::Beginner),
        ("중급", CourseLevel::Intermediate),
        ("고급", CourseLevel::Advanced),
        ("beginner", CourseLevel::Beginner),
        ("advanced", CourseLevel::Advanced),
    ] {
        let filter = CourseFilter {
            level: Some(label.to_string()),
            ..Default::default()
        };
        assert_eq!(filter.parsed_level(), Some(expected), "label {label}");
    }

    let filter = CourseFilter {
        level: Some("master".to_string()),
        ..Default::default()
    };
    assert!(filter.parsed_level().is_none());
}

#[test]
fn paid_predicate_matches_filter_semantics() {
    // is_paid requires a positive price and no free flag
    assert!(course(50_000, false, 0, 0.0, 0).is_paid());
    assert!(!course(0, false, 0, 0.0, 0).is_paid());
    assert!(!course(50_000, true, 0, 0.0, 0).is_paid());
    assert!(!course(0, true, 0, 0.0, 0).is_paid());
}

#[test]
fn progress_and_certificate_contract() {
    assert_eq!(progress_percentage(0, 0), 0);
    assert_eq!(progress_percentage(3, 4), 75);
    assert_eq!(progress_percentage(9, 10), 90);

    assert!(can_get_certificate(9, 10));
    assert!(!can_get_certificate(8, 10));

    let report = ProgressReport::from_counts(LessonCounts {
        total: 8,
        completed: 8,
    });
    assert_eq!(report.progress_percentage, 100);
    assert!(report.can_get_certificate);
    assert!(report.is_complete());

    let empty = ProgressReport::from_counts(LessonCounts {
        total: 0,
        completed: 0,
    });
    assert_eq!(empty.progress_percentage, 0);
    assert!(!empty.is_complete());
}

#[test]
fn revenue_split_contract() {
    // The documented example: 50,000 KRW gross splits 10,000 / 40,000
    assert_eq!(platform_fee(50_000), 10_000);
    assert_eq!(net_revenue(50_000), 40_000);

    let summary = RevenueSummary::from_amounts(&[50_000, 50_000, 30_000]);
    assert_eq!(summary.order_count, 3);
    assert_eq!(summary.gross, 130_000);
    assert_eq!(summary.fee, 26_000);
    assert_eq!(summary.net, 104_000);
    assert_eq!(summary.fee + summary.net, summary.gross);
}

#[test]
fn revenue_from_course_sales() {
    let summary = RevenueSummary::from_course_sales(&[(50_000, 3), (0, 100)]);

    // Free enrollments count as orders but add no gross
    assert_eq!(summary.order_count, 103);
    assert_eq!(summary.gross, 150_000);
    assert_eq!(summary.net, 120_000);
}

#[test]
fn instructor_stats_rollup() {
    let courses = vec![
        course(50_000, false, 120, 4.5, 30),
        course(0, true, 400, 4.0, 55),
        course(30_000, false, 10, 0.0, 0), // unrated, excluded from the mean
    ];

    let stats = InstructorStats::from_courses(&courses);

    assert_eq!(stats.total_courses, 3);
    assert_eq!(stats.total_students, 530);
    assert_eq!(stats.total_reviews, 85);
    assert!((stats.average_rating - 4.25).abs() < 1e-6);
}

#[test]
fn status_machines_reject_illegal_transitions() {
    use lvup_shared::models::order::OrderStatus;

    assert!(CourseStatus::Draft.can_transition_to(CourseStatus::Published));
    assert!(!CourseStatus::Draft.can_transition_to(CourseStatus::Archived));
    assert!(CourseStatus::Archived.can_transition_to(CourseStatus::Published));

    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
    assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Refunded));
    assert!(!OrderStatus::Refunded.can_transition_to(OrderStatus::Paid));
    assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Paid));
}
