/// Course model and catalog queries
///
/// Courses are authored by instructors, organized under categories, and move
/// through a small status machine:
///
/// ```text
/// draft → published → archived
///             ↑           |
///             └───────────┘
/// ```
///
/// Denormalized counters (`enrollment_count`, `average_rating`,
/// `review_count`) are maintained on writes so catalog listings stay a
/// single query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog::CourseFilter;

/// Course difficulty level
///
/// The public site historically used Korean labels; both the Korean label
/// and the enum name are accepted on input (a bijection over
/// 초급/중급/고급 ↔ beginner/intermediate/advanced).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "course_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    /// Enum name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }

    /// Korean display label
    pub fn korean_label(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "초급",
            CourseLevel::Intermediate => "중급",
            CourseLevel::Advanced => "고급",
        }
    }

    /// Parses a level from either the Korean label or the enum name
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "초급" | "beginner" => Some(CourseLevel::Beginner),
            "중급" | "intermediate" => Some(CourseLevel::Intermediate),
            "고급" | "advanced" => Some(CourseLevel::Advanced),
            _ => None,
        }
    }
}

/// Course publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "course_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// Being authored, not visible in the catalog
    Draft,

    /// Live in the catalog
    Published,

    /// Removed from the catalog, existing enrollments keep access
    Archived,
}

impl CourseStatus {
    /// Status name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
            CourseStatus::Archived => "archived",
        }
    }

    /// Checks whether a transition to `target` is legal
    pub fn can_transition_to(&self, target: CourseStatus) -> bool {
        matches!(
            (self, target),
            (CourseStatus::Draft, CourseStatus::Published)
                | (CourseStatus::Published, CourseStatus::Archived)
                | (CourseStatus::Archived, CourseStatus::Published)
        )
    }
}

/// Course row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    /// Unique course ID
    pub id: Uuid,

    /// Authoring instructor profile
    pub instructor_id: Uuid,

    /// Category (nullable, categories can be deleted)
    pub category_id: Option<Uuid>,

    /// Course title
    pub title: String,

    /// Long description
    pub description: String,

    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,

    /// Price in KRW; 0 for free courses
    pub price: i64,

    /// Explicit free flag; a course is free when `price = 0 OR is_free`
    pub is_free: bool,

    /// Difficulty level
    pub level: CourseLevel,

    /// Publication status
    pub status: CourseStatus,

    /// Denormalized enrollment count
    pub enrollment_count: i64,

    /// Denormalized mean review rating (0 when unreviewed)
    pub average_rating: f32,

    /// Denormalized review count
    pub review_count: i64,

    /// When the course was created
    pub created_at: DateTime<Utc>,

    /// When the course was last updated
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Whether this course requires payment to enroll
    pub fn is_paid(&self) -> bool {
        self.price > 0 && !self.is_free
    }
}

/// Flat catalog DTO: course joined with category and instructor names
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseSummary {
    /// Course ID
    pub id: Uuid,

    /// Course title
    pub title: String,

    /// Long description
    pub description: String,

    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,

    /// Price in KRW
    pub price: i64,

    /// Explicit free flag
    pub is_free: bool,

    /// Difficulty level
    pub level: CourseLevel,

    /// Authoring instructor profile ID
    pub instructor_id: Uuid,

    /// Instructor display name (null if the account has no name set)
    pub instructor_name: Option<String>,

    /// Category name (null for uncategorized courses)
    pub category_name: Option<String>,

    /// Denormalized enrollment count
    pub enrollment_count: i64,

    /// Denormalized mean rating
    pub average_rating: f32,

    /// Denormalized review count
    pub review_count: i64,

    /// When the course was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a course (starts in draft)
#[derive(Debug, Clone)]
pub struct CreateCourse {
    /// Authoring instructor profile
    pub instructor_id: Uuid,

    /// Category
    pub category_id: Option<Uuid>,

    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Thumbnail URL
    pub thumbnail_url: Option<String>,

    /// Price in KRW
    pub price: i64,

    /// Free flag
    pub is_free: bool,

    /// Difficulty level
    pub level: CourseLevel,
}

const SUMMARY_SELECT: &str = r#"
    SELECT c.id, c.title, c.description, c.thumbnail_url, c.price, c.is_free,
           c.level, c.instructor_id, u.name AS instructor_name,
           cat.name AS category_name, c.enrollment_count, c.average_rating,
           c.review_count, c.created_at
    FROM courses c
    JOIN instructor_profiles ip ON ip.id = c.instructor_id
    JOIN users u ON u.id = ip.user_id
    LEFT JOIN categories cat ON cat.id = c.category_id
"#;

impl Course {
    /// Creates a new course in draft status
    pub async fn create(pool: &PgPool, data: CreateCourse) -> Result<Self, sqlx::Error> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses
                (instructor_id, category_id, title, description, thumbnail_url,
                 price, is_free, level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, instructor_id, category_id, title, description,
                      thumbnail_url, price, is_free, level, status,
                      enrollment_count, average_rating, review_count,
                      created_at, updated_at
            "#,
        )
        .bind(data.instructor_id)
        .bind(data.category_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.thumbnail_url)
        .bind(data.price)
        .bind(data.is_free)
        .bind(data.level)
        .fetch_one(pool)
        .await?;

        Ok(course)
    }

    /// Finds a course by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, instructor_id, category_id, title, description,
                   thumbnail_url, price, is_free, level, status,
                   enrollment_count, average_rating, review_count,
                   created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(course)
    }

    /// Searches published courses with catalog filters
    ///
    /// Builds the WHERE clause dynamically from the filter, mirroring the
    /// filter semantics documented in `catalog`. Returns the requested page
    /// plus the total match count for pagination.
    pub async fn search(
        pool: &PgPool,
        filter: &CourseFilter,
    ) -> Result<(Vec<CourseSummary>, i64), sqlx::Error> {
        let mut conditions = String::from(" WHERE c.status = 'published'");
        let mut bind_count = 0;

        let level = filter.parsed_level();
        let search = filter.search_term();

        if filter.category.is_some() {
            bind_count += 1;
            conditions.push_str(&format!(" AND cat.name = ${}", bind_count));
        }
        if level.is_some() {
            bind_count += 1;
            conditions.push_str(&format!(" AND c.level = ${}", bind_count));
        }
        match filter.is_paid {
            Some(true) => conditions.push_str(" AND c.price > 0 AND NOT c.is_free"),
            Some(false) => conditions.push_str(" AND (c.price = 0 OR c.is_free)"),
            None => {}
        }
        if search.is_some() {
            bind_count += 1;
            conditions.push_str(&format!(
                " AND (c.title ILIKE ${n} OR c.description ILIKE ${n} OR u.name ILIKE ${n})",
                n = bind_count
            ));
        }

        // Total count over the same predicate
        let count_sql = format!(
            r#"
            SELECT COUNT(*)
            FROM courses c
            JOIN instructor_profiles ip ON ip.id = c.instructor_id
            JOIN users u ON u.id = ip.user_id
            LEFT JOIN categories cat ON cat.id = c.category_id
            {}
            "#,
            conditions
        );

        let page_sql = format!(
            "{} {} ORDER BY c.created_at DESC LIMIT ${} OFFSET ${}",
            SUMMARY_SELECT,
            conditions,
            bind_count + 1,
            bind_count + 2
        );

        let mut count_query = sqlx::query_as::<_, (i64,)>(&count_sql);
        let mut page_query = sqlx::query_as::<_, CourseSummary>(&page_sql);

        if let Some(ref category) = filter.category {
            count_query = count_query.bind(category);
            page_query = page_query.bind(category);
        }
        if let Some(level) = level {
            count_query = count_query.bind(level);
            page_query = page_query.bind(level);
        }
        if let Some(term) = search {
            let pattern = format!("%{}%", term);
            count_query = count_query.bind(pattern.clone());
            page_query = page_query.bind(pattern);
        }

        let (total,) = count_query.fetch_one(pool).await?;

        let items = page_query
            .bind(i64::from(filter.limit()))
            .bind(filter.offset())
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }

    /// Most-enrolled published courses
    pub async fn popular(pool: &PgPool, limit: i64) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let sql = format!(
            "{} WHERE c.status = 'published' \
             ORDER BY c.enrollment_count DESC, c.average_rating DESC LIMIT $1",
            SUMMARY_SELECT
        );

        sqlx::query_as::<_, CourseSummary>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Published courses of a given level, best-rated first
    ///
    /// Backs the recommendation endpoint.
    pub async fn by_level(
        pool: &PgPool,
        level: CourseLevel,
        limit: i64,
    ) -> Result<Vec<CourseSummary>, sqlx::Error> {
        let sql = format!(
            "{} WHERE c.status = 'published' AND c.level = $1 \
             ORDER BY c.average_rating DESC, c.enrollment_count DESC LIMIT $2",
            SUMMARY_SELECT
        );

        sqlx::query_as::<_, CourseSummary>(&sql)
            .bind(level)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Catalog summary for a single course
    pub async fn find_summary(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<CourseSummary>, sqlx::Error> {
        let sql = format!("{} WHERE c.id = $1", SUMMARY_SELECT);

        sqlx::query_as::<_, CourseSummary>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All courses of an instructor, drafts included
    pub async fn list_by_instructor(
        pool: &PgPool,
        instructor_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            r#"
            SELECT id, instructor_id, category_id, title, description,
                   thumbnail_url, price, is_free, level, status,
                   enrollment_count, average_rating, review_count,
                   created_at, updated_at
            FROM courses
            WHERE instructor_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(instructor_id)
        .fetch_all(pool)
        .await
    }

    /// Writes a new status without transition validation
    ///
    /// Callers must check `CourseStatus::can_transition_to` first; the admin
    /// route rejects illegal transitions with 409 before calling this.
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: CourseStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, instructor_id, category_id, title, description,
                      thumbnail_url, price, is_free, level, status,
                      enrollment_count, average_rating, review_count,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    /// Bumps the denormalized enrollment counter
    pub async fn increment_enrollment_count(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE courses SET enrollment_count = enrollment_count + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Recomputes `average_rating` and `review_count` from the reviews table
    ///
    /// Called after a review is created so listings never need the join.
    pub async fn refresh_rating(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE courses c
            SET average_rating = COALESCE(agg.avg_rating, 0),
                review_count = COALESCE(agg.cnt, 0),
                updated_at = NOW()
            FROM (
                SELECT AVG(r.rating)::REAL AS avg_rating, COUNT(*) AS cnt
                FROM reviews r
                JOIN enrollments e ON e.id = r.enrollment_id
                WHERE e.course_id = $1
            ) agg
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Counts all courses
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM courses")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_label_bijection() {
        for level in [
            CourseLevel::Beginner,
            CourseLevel::Intermediate,
            CourseLevel::Advanced,
        ] {
            assert_eq!(CourseLevel::from_label(level.korean_label()), Some(level));
            assert_eq!(CourseLevel::from_label(level.as_str()), Some(level));
        }

        assert!(CourseLevel::from_label("expert").is_none());
        assert!(CourseLevel::from_label("").is_none());
    }

    #[test]
    fn test_status_transitions() {
        use CourseStatus::*;

        assert!(Draft.can_transition_to(Published));
        assert!(Published.can_transition_to(Archived));
        assert!(Archived.can_transition_to(Published));

        assert!(!Draft.can_transition_to(Archived));
        assert!(!Published.can_transition_to(Draft));
        assert!(!Archived.can_transition_to(Archived));
    }

    #[test]
    fn test_is_paid_predicate() {
        fn course(price: i64, is_free: bool) -> Course {
            Course {
                id: Uuid::new_v4(),
                instructor_id: Uuid::new_v4(),
                category_id: None,
                title: "t".to_string(),
                description: String::new(),
                thumbnail_url: None,
                price,
                is_free,
                level: CourseLevel::Beginner,
                status: CourseStatus::Published,
                enrollment_count: 0,
                average_rating: 0.0,
                review_count: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }
        }

        assert!(course(50_000, false).is_paid());
        assert!(!course(0, false).is_paid());
        // Explicit free flag wins over a nonzero price
        assert!(!course(50_000, true).is_paid());
    }
}
