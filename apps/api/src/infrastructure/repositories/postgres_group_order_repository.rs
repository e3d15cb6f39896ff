use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::group_order::{GroupOrder, GroupOrderStatus, Participant};
use crate::domain::repositories::GroupOrderRepository;

const GROUP_ORDER_COLUMNS: &str = r#"
    id, product_id, creator_id, title, description,
    target_quantity, current_quantity, max_participants, current_participants,
    discount_price, deadline, status, created_at
"#;

#[derive(sqlx::FromRow)]
struct GroupOrderRow {
    id: Uuid,
    product_id: Uuid,
    creator_id: Uuid,
    title: String,
    description: Option<String>,
    target_quantity: i32,
    current_quantity: i32,
    max_participants: i32,
    current_participants: i32,
    discount_price: Decimal,
    deadline: DateTime<Utc>,
    status: GroupOrderStatus,
    created_at: DateTime<Utc>,
}

impl From<GroupOrderRow> for GroupOrder {
    fn from(r: GroupOrderRow) -> Self {
        GroupOrder::from_persistence(
            r.id,
            r.product_id,
            r.creator_id,
            r.title,
            r.description,
            r.target_quantity,
            r.current_quantity,
            r.max_participants,
            r.current_participants,
            r.discount_price,
            r.deadline,
            r.status,
            r.created_at,
        )
    }
}

/// PostgreSQL implementation of GroupOrderRepository
pub struct PostgresGroupOrderRepository {
    pool: PgPool,
}

impl PostgresGroupOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupOrderRepository for PostgresGroupOrderRepository {
    async fn create(&self, group_order: &GroupOrder) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO group_orders ({GROUP_ORDER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
        ))
        .bind(group_order.id())
        .bind(group_order.product_id())
        .bind(group_order.creator_id())
        .bind(group_order.title())
        .bind(group_order.description())
        .bind(group_order.target_quantity())
        .bind(group_order.current_quantity())
        .bind(group_order.max_participants())
        .bind(group_order.current_participants())
        .bind(group_order.discount_price())
        .bind(group_order.deadline())
        .bind(group_order.status())
        .bind(group_order.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupOrder>, RepositoryError> {
        let row = sqlx::query_as::<_, GroupOrderRow>(&format!(
            "SELECT {GROUP_ORDER_COLUMNS} FROM group_orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GroupOrder::from))
    }

    async fn list_open(&self) -> Result<Vec<GroupOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, GroupOrderRow>(&format!(
            r#"
            SELECT {GROUP_ORDER_COLUMNS}
            FROM group_orders
            WHERE status = 'active' AND deadline > NOW()
            ORDER BY deadline ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GroupOrder::from).collect())
    }

    async fn participants(&self, group_order_id: Uuid) -> Result<Vec<Participant>, RepositoryError> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, group_order_id, vendor_id, quantity, joined_at
            FROM group_order_participants
            WHERE group_order_id = $1
            ORDER BY joined_at ASC
            "#,
        )
        .bind(group_order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    async fn join(
        &self,
        group_order_id: Uuid,
        vendor_id: Uuid,
        quantity: i32,
    ) -> Result<GroupOrder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Capacity, status, and deadline are re-checked by the same statement
        // that bumps the counters, so concurrent joins cannot overbook.
        let row = sqlx::query_as::<_, GroupOrderRow>(&format!(
            r#"
            UPDATE group_orders
            SET current_participants = current_participants + 1,
                current_quantity = current_quantity + $2,
                status = CASE
                    WHEN current_quantity + $2 >= target_quantity
                        THEN 'completed'::group_order_status
                    ELSE status
                END
            WHERE id = $1
              AND status = 'active'
              AND deadline > NOW()
              AND current_participants < max_participants
              AND current_quantity <= 2147483647 - $2
            RETURNING {GROUP_ORDER_COLUMNS}
            "#
        ))
        .bind(group_order_id)
        .bind(quantity)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            RepositoryError::Conflict("Group order is full or no longer open".to_string())
        })?;

        sqlx::query(
            r#"
            INSERT INTO group_order_participants (id, group_order_id, vendor_id, quantity, joined_at)
            VALUES ($1, $2, $3, $4, NOW())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(group_order_id)
        .bind(vendor_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            RepositoryError::unique_violation(e, "You have already joined this group order")
        })?;

        tx.commit().await?;
        Ok(GroupOrder::from(row))
    }

    async fn cancel(
        &self,
        group_order_id: Uuid,
        creator_id: Uuid,
    ) -> Result<GroupOrder, RepositoryError> {
        let row = sqlx::query_as::<_, GroupOrderRow>(&format!(
            r#"
            UPDATE group_orders
            SET status = 'cancelled'
            WHERE id = $1
              AND creator_id = $2
              AND status = 'active'
              AND deadline > NOW()
            RETURNING {GROUP_ORDER_COLUMNS}
            "#
        ))
        .bind(group_order_id)
        .bind(creator_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::Conflict("Group order is no longer open".to_string()))?;

        Ok(GroupOrder::from(row))
    }
}
