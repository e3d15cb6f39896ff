use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::GroupOrderStatus;
use crate::domain::catalog::Product;
use crate::domain::errors::{DomainError, Validator};

/// Fields a vendor submits to open a group order
#[derive(Debug, Clone, Deserialize)]
pub struct GroupOrderDraft {
    pub product_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_quantity: i32,
    pub max_participants: i32,
    pub discount_price: Decimal,
    pub deadline: DateTime<Utc>,
}

/// A vendor's commitment to a group order
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub group_order_id: Uuid,
    pub vendor_id: Uuid,
    pub quantity: i32,
    pub joined_at: DateTime<Utc>,
}

/// Group order aggregate root
///
/// # Invariants
/// - `current_participants <= max_participants`
/// - Joins are accepted only while active and before the deadline
/// - Reaching `target_quantity` completes the group order
#[derive(Debug, Clone)]
pub struct GroupOrder {
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

impl GroupOrder {
    /// Opens a group order for `product`
    ///
    /// # Business Rules Enforced
    /// - Target quantity at least 1, room for at least 2 participants
    /// - Discount price positive and below the product's list price
    /// - Deadline in the future
    pub fn open(
        creator_id: Uuid,
        product: &Product,
        draft: GroupOrderDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if !product.is_active || product.id != draft.product_id {
            return Err(DomainError::NotFound("Product"));
        }

        Validator::new()
            .text(&draft.title, "title", 200)
            .optional_text(draft.description.as_deref(), "description", 2000)
            .check(
                draft.target_quantity >= 1,
                "target_quantity",
                "target_quantity must be at least 1",
            )
            .check(
                draft.max_participants >= 2,
                "max_participants",
                "max_participants must be at least 2",
            )
            .money(draft.discount_price, "discount_price")
            .check(
                draft.discount_price < product.price,
                "discount_price",
                "discount_price must be below the product price",
            )
            .check(draft.deadline > now, "deadline", "deadline must be in the future")
            .finish()?;

        Ok(Self {
            id: Uuid::new_v4(),
            product_id: product.id,
            creator_id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            target_quantity: draft.target_quantity,
            current_quantity: 0,
            max_participants: draft.max_participants,
            current_participants: 0,
            discount_price: draft.discount_price,
            deadline: draft.deadline,
            status: GroupOrderStatus::Active,
            created_at: now,
        })
    }

    /// Checks whether a vendor may commit `quantity` units at `now`
    ///
    /// Duplicate joins are detected by storage, not here. The join itself is
    /// one conditional UPDATE in the repository.
    pub fn check_join(&self, quantity: i32, now: DateTime<Utc>) -> Result<(), DomainError> {
        Validator::new()
            .check(quantity >= 1, "quantity", "quantity must be at least 1")
            .check(
                self.current_quantity.checked_add(quantity).is_some(),
                "quantity",
                "quantity is too large for this group order",
            )
            .finish()?;

        if self.status != GroupOrderStatus::Active {
            return Err(DomainError::rule(format!("Group order is {}", self.status)));
        }
        if now >= self.deadline {
            return Err(DomainError::rule("Group order deadline has passed"));
        }
        if self.is_full() {
            return Err(DomainError::rule("Group order is full"));
        }
        Ok(())
    }

    /// Checks that `actor` may withdraw the group order at `now`
    ///
    /// Only its creator may, and only while it is still open. The stored
    /// status is rewritten by the repository under the same conditions.
    pub fn check_cancel(&self, actor: Uuid, now: DateTime<Utc>) -> Result<(), DomainError> {
        if actor != self.creator_id {
            return Err(DomainError::NotFound("Group order"));
        }
        match self.status_at(now) {
            GroupOrderStatus::Active => Ok(()),
            status => Err(DomainError::rule(format!("Group order is {}", status))),
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }

    /// Status as seen at `now`: an active order past its deadline reads as expired
    pub fn status_at(&self, now: DateTime<Utc>) -> GroupOrderStatus {
        if self.status == GroupOrderStatus::Active && now >= self.deadline {
            GroupOrderStatus::Expired
        } else {
            self.status
        }
    }

    /// Percentage of the target quantity committed so far, capped at 100
    pub fn progress_percent(&self) -> i32 {
        if self.target_quantity <= 0 {
            return 0;
        }
        let percent = i64::from(self.current_quantity) * 100 / i64::from(self.target_quantity);
        percent.min(100) as i32
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn creator_id(&self) -> Uuid {
        self.creator_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn target_quantity(&self) -> i32 {
        self.target_quantity
    }

    pub fn current_quantity(&self) -> i32 {
        self.current_quantity
    }

    pub fn max_participants(&self) -> i32 {
        self.max_participants
    }

    pub fn current_participants(&self) -> i32 {
        self.current_participants
    }

    pub fn discount_price(&self) -> Decimal {
        self.discount_price
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn status(&self) -> GroupOrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a GroupOrder from persistence layer data
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
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
    ) -> Self {
        Self {
            id,
            product_id,
            creator_id,
            title,
            description,
            target_quantity,
            current_quantity,
            max_participants,
            current_participants,
            discount_price,
            deadline,
            status,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ProductDraft;
    use chrono::Duration;

    fn product() -> Product {
        Product::create(
            Uuid::new_v4(),
            ProductDraft {
                name: "Onions".to_string(),
                description: None,
                category_id: None,
                price: Decimal::new(3000, 2),
                unit: "sack".to_string(),
                min_order_quantity: 1,
                stock_quantity: 500,
                bulk_discount_price: None,
                bulk_discount_threshold: None,
                image_url: None,
            },
        )
        .unwrap()
    }

    fn draft(product: &Product, now: DateTime<Utc>) -> GroupOrderDraft {
        GroupOrderDraft {
            product_id: product.id,
            title: "Weekly onion pool".to_string(),
            description: None,
            target_quantity: 100,
            max_participants: 3,
            discount_price: Decimal::new(2500, 2),
            deadline: now + Duration::days(3),
        }
    }

    fn open() -> (GroupOrder, DateTime<Utc>) {
        let now = Utc::now();
        let product = product();
        let group = GroupOrder::open(Uuid::new_v4(), &product, draft(&product, now), now).unwrap();
        (group, now)
    }

    #[test]
    fn open_group_order_starts_empty() {
        let (group, _) = open();
        assert_eq!(group.status(), GroupOrderStatus::Active);
        assert_eq!(group.current_participants(), 0);
        assert_eq!(group.current_quantity(), 0);
        assert_eq!(group.progress_percent(), 0);
    }

    #[test]
    fn discount_must_undercut_product_price() {
        let now = Utc::now();
        let product = product();
        let mut d = draft(&product, now);
        d.discount_price = Decimal::new(3000, 2);
        let err = GroupOrder::open(Uuid::new_v4(), &product, d, now).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "discount_price");
    }

    #[test]
    fn deadline_in_past_rejected() {
        let now = Utc::now();
        let product = product();
        let mut d = draft(&product, now);
        d.deadline = now - Duration::hours(1);
        assert!(GroupOrder::open(Uuid::new_v4(), &product, d, now).is_err());
    }

    /// The open group order with progress already stored
    fn with_progress(
        group: &GroupOrder,
        participants: i32,
        quantity: i32,
        status: GroupOrderStatus,
    ) -> GroupOrder {
        GroupOrder::from_persistence(
            group.id(),
            group.product_id(),
            group.creator_id(),
            group.title().to_string(),
            None,
            group.target_quantity(),
            quantity,
            group.max_participants(),
            participants,
            group.discount_price(),
            group.deadline(),
            status,
            group.created_at(),
        )
    }

    #[test]
    fn join_allowed_with_room_left() {
        let (group, now) = open();
        let group = with_progress(&group, 2, 50, GroupOrderStatus::Active);
        assert!(group.check_join(20, now).is_ok());
        assert_eq!(group.progress_percent(), 50);
    }

    #[test]
    fn completed_group_order_rejects_joins() {
        let (group, now) = open();
        let group = with_progress(&group, 2, 105, GroupOrderStatus::Completed);
        assert_eq!(group.progress_percent(), 100);
        assert_eq!(
            group.check_join(1, now),
            Err(DomainError::rule("Group order is completed"))
        );
    }

    #[test]
    fn joining_full_group_order_rejected() {
        let (group, now) = open();
        let group = with_progress(&group, 3, 3, GroupOrderStatus::Active);
        assert!(group.is_full());
        assert_eq!(
            group.check_join(1, now),
            Err(DomainError::rule("Group order is full"))
        );
    }

    #[test]
    fn join_quantity_that_overflows_rejected() {
        let (group, now) = open();
        let group = with_progress(&group, 1, 1, GroupOrderStatus::Active);
        let err = group.check_join(i32::MAX, now).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "quantity");
    }

    #[test]
    fn joining_after_deadline_rejected() {
        let (group, now) = open();
        let later = now + Duration::days(4);
        assert!(group.check_join(1, later).is_err());
        assert_eq!(group.status_at(later), GroupOrderStatus::Expired);
    }

    #[test]
    fn zero_quantity_join_rejected() {
        let (group, now) = open();
        let err = group.check_join(0, now).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "quantity");
    }

    #[test]
    fn sub_cent_discount_rejected() {
        let now = Utc::now();
        let product = product();
        let mut d = draft(&product, now);
        d.discount_price = Decimal::new(24999, 3);
        let err = GroupOrder::open(Uuid::new_v4(), &product, d, now).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "discount_price");
    }

    #[test]
    fn only_creator_cancels() {
        let (group, now) = open();
        assert_eq!(
            group.check_cancel(Uuid::new_v4(), now),
            Err(DomainError::NotFound("Group order"))
        );
        assert!(group.check_cancel(group.creator_id(), now).is_ok());
    }

    #[test]
    fn closed_group_order_cannot_be_cancelled() {
        let (group, now) = open();
        let creator = group.creator_id();

        let completed = with_progress(&group, 2, 100, GroupOrderStatus::Completed);
        assert!(matches!(completed.check_cancel(creator, now), Err(DomainError::Rule(_))));

        let later = now + Duration::days(4);
        assert_eq!(
            group.check_cancel(creator, later),
            Err(DomainError::rule("Group order is expired"))
        );
    }
}
