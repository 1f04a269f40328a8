/// Order model
///
/// Orders record purchases of paid courses. Payment capture itself happens
/// at an external gateway and is out of scope; the API only moves orders
/// through the status machine:
///
/// ```text
/// pending → paid → refunded
/// pending → cancelled
/// ```
///
/// Transitions are validated before the update; an illegal transition is a
/// 409 at the API layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, awaiting payment
    Pending,

    /// Payment confirmed
    Paid,

    /// Abandoned or rejected before payment
    Cancelled,

    /// Paid and later refunded
    Refunded,
}

impl OrderStatus {
    /// Status name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    /// Checks whether a transition to `target` is legal
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        matches!(
            (self, target),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Paid, OrderStatus::Refunded)
        )
    }

    /// Terminal states cannot transition further
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Refunded)
    }
}

/// Order row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID
    pub id: Uuid,

    /// Purchasing user
    pub user_id: Uuid,

    /// Course being purchased
    pub course_id: Uuid,

    /// Gross amount in KRW, captured from the course price at order time
    pub amount: i64,

    /// Current status
    pub status: OrderStatus,

    /// When payment was confirmed
    pub paid_at: Option<DateTime<Utc>>,

    /// When the order was created
    pub created_at: DateTime<Utc>,

    /// When the order was last updated
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a pending order
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        course_id: Uuid,
        amount: i64,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, course_id, amount)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, course_id, amount, status, paid_at,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(amount)
        .fetch_one(pool)
        .await
    }

    /// Finds an order by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, course_id, amount, status, paid_at,
                   created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a user's orders, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, course_id, amount, status, paid_at,
                   created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Writes a new status; stamps `paid_at` when moving to paid
    ///
    /// Callers must check `OrderStatus::can_transition_to` first.
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2,
                paid_at = CASE WHEN $2 = 'paid'::order_status THEN NOW() ELSE paid_at END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, course_id, amount, status, paid_at,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    /// Gross amounts of paid orders for an instructor's courses
    ///
    /// Feeds the revenue summary; fee arithmetic is in the `revenue` module.
    pub async fn paid_amounts_by_instructor(
        pool: &PgPool,
        instructor_id: Uuid,
    ) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            r#"
            SELECT o.amount
            FROM orders o
            JOIN courses c ON c.id = o.course_id
            WHERE c.instructor_id = $1 AND o.status = 'paid'
            "#,
        )
        .bind(instructor_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|(amount,)| amount).collect())
    }

    /// Count and gross amount over all paid orders on the platform
    pub async fn paid_totals(pool: &PgPool) -> Result<(i64, i64), sqlx::Error> {
        // SUM(bigint) widens to numeric, cast back for the i64 decode
        sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(amount), 0)::BIGINT FROM orders WHERE status = 'paid'",
        )
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Paid.can_transition_to(Refunded));

        assert!(!Pending.can_transition_to(Refunded));
        assert!(!Paid.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Paid));
        assert!(!Refunded.can_transition_to(Pending));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Refunded.is_terminal());
    }
}
