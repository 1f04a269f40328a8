/// Course category model

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Category row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID
    pub id: Uuid,

    /// Display name (unique)
    pub name: String,

    /// URL slug (unique)
    pub slug: String,
}

impl Category {
    /// Creates a category
    pub async fn create(pool: &PgPool, name: &str, slug: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
    }

    /// Lists all categories, alphabetically
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Finds a category by name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name, slug FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
