use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::price_alert::{PriceAlert, PriceAlertView};
use crate::domain::repositories::PriceAlertRepository;

#[derive(sqlx::FromRow)]
struct PriceAlertRow {
    id: Uuid,
    vendor_id: Uuid,
    product_id: Uuid,
    target_price: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
    product_name: String,
    current_price: Decimal,
}

impl From<PriceAlertRow> for PriceAlertView {
    fn from(r: PriceAlertRow) -> Self {
        let alert = PriceAlert {
            id: r.id,
            vendor_id: r.vendor_id,
            product_id: r.product_id,
            target_price: r.target_price,
            is_active: r.is_active,
            created_at: r.created_at,
        };
        PriceAlertView::new(alert, r.product_name, r.current_price)
    }
}

/// PostgreSQL implementation of PriceAlertRepository
pub struct PostgresPriceAlertRepository {
    pool: PgPool,
}

impl PostgresPriceAlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceAlertRepository for PostgresPriceAlertRepository {
    async fn create(&self, alert: &PriceAlert) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO price_alerts (id, vendor_id, product_id, target_price, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(alert.id)
        .bind(alert.vendor_id)
        .bind(alert.product_id)
        .bind(alert.target_price)
        .bind(alert.is_active)
        .bind(alert.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<PriceAlertView>, RepositoryError> {
        let rows = sqlx::query_as::<_, PriceAlertRow>(
            r#"
            SELECT a.id, a.vendor_id, a.product_id, a.target_price, a.is_active, a.created_at,
                   p.name AS product_name, p.price AS current_price
            FROM price_alerts a
            JOIN products p ON p.id = a.product_id
            WHERE a.vendor_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PriceAlertView::from).collect())
    }

    async fn delete(&self, id: Uuid, vendor_id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM price_alerts WHERE id = $1 AND vendor_id = $2")
            .bind(id)
            .bind(vendor_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("Price alert"));
        }

        Ok(())
    }
}
