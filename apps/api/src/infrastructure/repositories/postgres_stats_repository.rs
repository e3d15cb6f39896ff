use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::order::OrderStatus;
use crate::domain::repositories::StatsRepository;
use crate::domain::review::SupplierRating;
use crate::domain::stats::{SupplierStats, VendorStats};

/// PostgreSQL implementation of StatsRepository
///
/// Every figure is an aggregate over stored rows.
pub struct PostgresStatsRepository {
    pool: PgPool,
}

impl PostgresStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PostgresStatsRepository {
    async fn vendor_stats(&self, vendor_id: Uuid) -> Result<VendorStats, RepositoryError> {
        let credit_score: i32 = sqlx::query_scalar("SELECT credit_score FROM users WHERE id = $1")
            .bind(vendor_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound("User"))?;

        let (total_orders, active_orders, total_spent): (i64, i64, Decimal) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = ANY($2)),
                COALESCE(SUM(total_amount) FILTER (WHERE status <> 'cancelled'), 0)
            FROM orders
            WHERE vendor_id = $1
            "#,
        )
        .bind(vendor_id)
        .bind(OrderStatus::open_statuses())
        .fetch_one(&self.pool)
        .await?;

        let group_orders_joined: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM group_order_participants WHERE vendor_id = $1",
        )
        .bind(vendor_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(VendorStats {
            total_orders,
            active_orders,
            total_spent,
            group_orders_joined,
            credit_score,
        })
    }

    async fn supplier_stats(&self, supplier_id: Uuid) -> Result<SupplierStats, RepositoryError> {
        let active_products: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE supplier_id = $1 AND is_active",
        )
        .bind(supplier_id)
        .fetch_one(&self.pool)
        .await?;

        let (total_orders, pending_orders, revenue): (i64, i64, Decimal) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'pending'),
                COALESCE(SUM(total_amount) FILTER (WHERE status = 'delivered'), 0)
            FROM orders
            WHERE supplier_id = $1
            "#,
        )
        .bind(supplier_id)
        .fetch_one(&self.pool)
        .await?;

        let (rating_sum, review_count): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(rating), 0)::BIGINT, COUNT(*) FROM reviews WHERE supplier_id = $1",
        )
        .bind(supplier_id)
        .fetch_one(&self.pool)
        .await?;
        let rating = SupplierRating::from_totals(supplier_id, rating_sum, review_count);

        Ok(SupplierStats {
            active_products,
            total_orders,
            pending_orders,
            revenue,
            average_rating: rating.average_rating,
            review_count: rating.review_count,
        })
    }
}
