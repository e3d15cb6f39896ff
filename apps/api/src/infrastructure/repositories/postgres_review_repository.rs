use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::repositories::ReviewRepository;
use crate::domain::review::{Review, SupplierRating};

/// PostgreSQL implementation of ReviewRepository
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (
                id, reviewer_id, supplier_id, order_id, product_id, rating, comment, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(review.id)
        .bind(review.reviewer_id)
        .bind(review.supplier_id)
        .bind(review.order_id)
        .bind(review.product_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::missing_reference(e, "Order or product"))?;

        Ok(())
    }

    async fn find_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_id, supplier_id, order_id, product_id, rating, comment, created_at
            FROM reviews
            WHERE supplier_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(supplier_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn rating_for_supplier(&self, supplier_id: Uuid) -> Result<SupplierRating, RepositoryError> {
        let (rating_sum, review_count): (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(rating), 0)::BIGINT, COUNT(*) FROM reviews WHERE supplier_id = $1",
        )
        .bind(supplier_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(SupplierRating::from_totals(supplier_id, rating_sum, review_count))
    }
}
