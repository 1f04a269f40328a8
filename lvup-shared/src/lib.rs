//! # LVUP EDU Shared Library
//!
//! Shared types and business logic for the LVUP EDU course marketplace:
//! database models, authentication primitives, and the aggregation logic
//! behind catalog search, enrollment progress, revenue and instructor
//! statistics.
//!
//! ## Module Organization
//!
//! - `models`: database models and CRUD operations
//! - `auth`: JWT, password hashing, authorization
//! - `db`: connection pool and migrations
//! - `catalog`: course listing filters
//! - `progress`: enrollment progress percentages and certificates
//! - `revenue`: platform fee and revenue summaries
//! - `stats`: instructor statistics roll-up

pub mod auth;
pub mod catalog;
pub mod db;
pub mod models;
pub mod progress;
pub mod revenue;
pub mod stats;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
