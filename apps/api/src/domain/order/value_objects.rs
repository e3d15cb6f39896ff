use serde::{Deserialize, Serialize};

use crate::domain::user::UserRole;

/// Fulfilment status of an order
///
/// # Status Transitions
/// ```text
/// Pending -> Confirmed -> Shipped -> Delivered
///    |           |
///    +-----------+---> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by the vendor, awaiting the supplier
    Pending,
    /// Accepted by the supplier
    Confirmed,
    /// Handed to the carrier
    Shipped,
    /// Received by the vendor
    Delivered,
    /// Withdrawn before shipping
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Checks if a transition from current status to next status is valid
    ///
    /// # Example
    /// ```
    /// use vendorlink_api::domain::order::OrderStatus;
    ///
    /// assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
    /// assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
    /// ```
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }

    /// Narrows [`OrderStatus::can_transition_to`] to what `role` may do.
    /// Suppliers drive fulfilment; vendors may only withdraw a pending order.
    pub fn can_transition_as(&self, next: OrderStatus, role: UserRole) -> bool {
        match role {
            UserRole::Supplier => self.can_transition_to(next),
            UserRole::Vendor => {
                matches!((self, next), (OrderStatus::Pending, OrderStatus::Cancelled))
            }
        }
    }

    /// True while the order still awaits delivery
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Shipped
        )
    }

    /// Every status counted as an active order
    pub fn open_statuses() -> Vec<OrderStatus> {
        Self::ALL.into_iter().filter(OrderStatus::is_open).collect()
    }
}

impl sqlx::postgres::PgHasArrayType for OrderStatus {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_order_status")
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fulfilment_path_is_valid() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn cancellation_only_before_shipping() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn no_skipping_or_reversing() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn vendor_may_only_cancel_pending() {
        assert!(OrderStatus::Pending.can_transition_as(OrderStatus::Cancelled, UserRole::Vendor));
        assert!(!OrderStatus::Confirmed.can_transition_as(OrderStatus::Cancelled, UserRole::Vendor));
        assert!(!OrderStatus::Pending.can_transition_as(OrderStatus::Confirmed, UserRole::Vendor));
    }

    #[test]
    fn supplier_follows_full_graph() {
        assert!(OrderStatus::Confirmed.can_transition_as(OrderStatus::Cancelled, UserRole::Supplier));
        assert!(OrderStatus::Shipped.can_transition_as(OrderStatus::Delivered, UserRole::Supplier));
    }

    #[test]
    fn unknown_status_fails_to_deserialize() {
        assert!(serde_json::from_str::<OrderStatus>("\"lost\"").is_err());
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"shipped\"").unwrap(),
            OrderStatus::Shipped
        );
    }

    #[test]
    fn open_statuses_await_delivery() {
        assert_eq!(
            OrderStatus::open_statuses(),
            vec![OrderStatus::Pending, OrderStatus::Confirmed, OrderStatus::Shipped]
        );
    }
}
