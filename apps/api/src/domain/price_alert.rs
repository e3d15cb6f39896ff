// Vendor price alerts on products

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, Validator};

#[derive(Debug, Clone, Deserialize)]
pub struct PriceAlertDraft {
    pub product_id: Uuid,
    pub target_price: Decimal,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PriceAlert {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub product_id: Uuid,
    pub target_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl PriceAlert {
    pub fn new(vendor_id: Uuid, draft: PriceAlertDraft) -> Result<Self, DomainError> {
        Validator::new()
            .money(draft.target_price, "target_price")
            .finish()?;

        Ok(Self {
            id: Uuid::new_v4(),
            vendor_id,
            product_id: draft.product_id,
            target_price: draft.target_price,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    /// An active alert fires once the product is at or below the target
    pub fn is_triggered(&self, current_price: Decimal) -> bool {
        self.is_active && current_price <= self.target_price
    }
}

/// A price alert joined with the product's current listing
#[derive(Debug, Clone, Serialize)]
pub struct PriceAlertView {
    #[serde(flatten)]
    pub alert: PriceAlert,
    pub product_name: String,
    pub current_price: Decimal,
    pub triggered: bool,
}

impl PriceAlertView {
    pub fn new(alert: PriceAlert, product_name: String, current_price: Decimal) -> Self {
        let triggered = alert.is_triggered(current_price);
        Self {
            alert,
            product_name,
            current_price,
            triggered,
        }
    }
}
