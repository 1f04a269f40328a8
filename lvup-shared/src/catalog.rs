/// Course catalog filters
///
/// Translates query-string filters into the predicate used by
/// `Course::search`. The filter itself is pure data plus normalization
/// rules; the SQL construction lives with the model.
///
/// # Filters
///
/// - `category`: category name, exact match
/// - `level`: course level, accepted as the enum name ("beginner") or the
///   Korean label ("초급")
/// - `is_paid`: `true` keeps `price > 0 AND NOT is_free`, `false` keeps
///   `price = 0 OR is_free`
/// - `search`: case-insensitive substring match over title, description and
///   instructor name
/// - `page`/`limit`: 1-based pagination, defaults page=1 limit=12

use serde::Deserialize;

use crate::models::course::CourseLevel;

/// Default page when none is given
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size
pub const DEFAULT_LIMIT: u32 = 12;

/// Upper bound on page size to keep result sets sane
pub const MAX_LIMIT: u32 = 100;

/// Catalog query filters, deserialized straight from the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    /// Category name
    pub category: Option<String>,

    /// Level, enum name or Korean label
    pub level: Option<String>,

    /// Paid/free filter
    pub is_paid: Option<bool>,

    /// Free-text search term
    pub search: Option<String>,

    /// 1-based page number
    pub page: Option<u32>,

    /// Page size
    pub limit: Option<u32>,
}

impl CourseFilter {
    /// Effective page (defaults to 1, zero treated as 1)
    pub fn page(&self) -> u32 {
        match self.page {
            Some(0) | None => DEFAULT_PAGE,
            Some(p) => p,
        }
    }

    /// Effective page size (defaults to 12, clamped to `MAX_LIMIT`)
    pub fn limit(&self) -> u32 {
        match self.limit {
            Some(0) | None => DEFAULT_LIMIT,
            Some(l) => l.min(MAX_LIMIT),
        }
    }

    /// Rows to skip: `(page - 1) * limit`
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }

    /// Parsed level filter, if present and recognizable
    pub fn parsed_level(&self) -> Option<CourseLevel> {
        self.level.as_deref().and_then(CourseLevel::from_label)
    }

    /// Search term trimmed and emptied-out when blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filter = CourseFilter::default();
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), 12);
        assert_eq!(filter.offset(), 0);
        assert!(filter.parsed_level().is_none());
        assert!(filter.search_term().is_none());
    }

    #[test]
    fn test_offset_math() {
        let filter = CourseFilter {
            page: Some(3),
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(filter.offset(), 40);
    }

    #[test]
    fn test_zero_page_treated_as_first() {
        let filter = CourseFilter {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn test_limit_clamped() {
        let filter = CourseFilter {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(filter.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_level_accepts_korean_and_enum_names() {
        let korean = CourseFilter {
            level: Some("초급".to_string()),
            ..Default::default()
        };
        assert_eq!(korean.parsed_level(), Some(CourseLevel::Beginner));

        let english = CourseFilter {
            level: Some("advanced".to_string()),
            ..Default::default()
        };
        assert_eq!(english.parsed_level(), Some(CourseLevel::Advanced));

        let junk = CourseFilter {
            level: Some("grandmaster".to_string()),
            ..Default::default()
        };
        assert!(junk.parsed_level().is_none());
    }

    #[test]
    fn test_blank_search_ignored() {
        let filter = CourseFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.search_term().is_none());

        let filter = CourseFilter {
            search: Some("  pilates ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), Some("pilates"));
    }
}
