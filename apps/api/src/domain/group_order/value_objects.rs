use serde::{Deserialize, Serialize};

/// Lifecycle status of a group order
///
/// # Status Transitions
/// ```text
/// Active -> Completed   (target quantity reached)
///        -> Cancelled   (withdrawn by its creator)
///        -> Expired     (deadline passed before the target)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "group_order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GroupOrderStatus {
    Active,
    Completed,
    Cancelled,
    Expired,
}

impl std::fmt::Display for GroupOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupOrderStatus::Active => write!(f, "active"),
            GroupOrderStatus::Completed => write!(f, "completed"),
            GroupOrderStatus::Cancelled => write!(f, "cancelled"),
            GroupOrderStatus::Expired => write!(f, "expired"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(GroupOrderStatus::Active.to_string(), "active");
        assert_eq!(GroupOrderStatus::Completed.to_string(), "completed");
        assert_eq!(GroupOrderStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(GroupOrderStatus::Expired.to_string(), "expired");
    }
}
