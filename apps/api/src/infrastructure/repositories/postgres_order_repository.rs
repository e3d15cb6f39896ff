use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::repositories::OrderRepository;

const ORDER_COLUMNS: &str = r#"
    id, vendor_id, supplier_id, product_id, quantity, unit_price, total_amount,
    status, delivery_address, notes, created_at, updated_at
"#;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    vendor_id: Uuid,
    supplier_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
    total_amount: Decimal,
    status: OrderStatus,
    delivery_address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        Order::from_persistence(
            r.id,
            r.vendor_id,
            r.supplier_id,
            r.product_id,
            r.quantity,
            r.unit_price,
            r.total_amount,
            r.status,
            r.delivery_address,
            r.notes,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &str, id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE {column} = $1 ORDER BY created_at DESC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $2, updated_at = NOW()
            WHERE id = $1 AND is_active AND stock_quantity >= $2
            "#,
        )
        .bind(order.product_id())
        .bind(order.quantity())
        .execute(&mut *tx)
        .await?;

        if reserved.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(
                "Insufficient stock for this order".to_string(),
            ));
        }

        sqlx::query(&format!(
            "INSERT INTO orders ({ORDER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"
        ))
        .bind(order.id())
        .bind(order.vendor_id())
        .bind(order.supplier_id())
        .bind(order.product_id())
        .bind(order.quantity())
        .bind(order.unit_price())
        .bind(order.total_amount())
        .bind(order.status())
        .bind(order.delivery_address())
        .bind(order.notes())
        .bind(order.created_at())
        .bind(order.updated_at())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Order::from))
    }

    async fn find_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        self.find_where("vendor_id", vendor_id).await
    }

    async fn find_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<Order>, RepositoryError> {
        self.find_where("supplier_id", supplier_id).await
    }

    async fn update_status(
        &self,
        order: &Order,
        previous: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Written only over the status the transition was validated against,
        // so stock is restored at most once and stale copies cannot rewind
        let result = sqlx::query(
            "UPDATE orders SET status = $2, updated_at = $3 WHERE id = $1 AND status = $4",
        )
        .bind(order.id())
        .bind(order.status())
        .bind(order.updated_at())
        .bind(previous)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(format!(
                "Order is no longer {}",
                previous
            )));
        }

        if order.status() == OrderStatus::Cancelled {
            sqlx::query(
                "UPDATE products SET stock_quantity = stock_quantity + $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(order.product_id())
            .bind(order.quantity())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
