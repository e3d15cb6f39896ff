// Per-role dashboard figures, computed from stored rows

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorStats {
    pub total_orders: i64,
    /// Pending, confirmed, or shipped
    pub active_orders: i64,
    /// Sum over orders that were not cancelled
    pub total_spent: Decimal,
    pub group_orders_joined: i64,
    pub credit_score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierStats {
    pub active_products: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
    /// Sum over delivered orders
    pub revenue: Decimal,
    pub average_rating: Option<Decimal>,
    pub review_count: i64,
}
