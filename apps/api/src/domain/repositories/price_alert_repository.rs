use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::price_alert::{PriceAlert, PriceAlertView};

#[async_trait]
pub trait PriceAlertRepository: Send + Sync {
    async fn create(&self, alert: &PriceAlert) -> Result<(), RepositoryError>;

    /// A vendor's alerts with each product's current price
    async fn find_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<PriceAlertView>, RepositoryError>;

    /// Delete an alert owned by `vendor_id`; anything else is `NotFound`
    async fn delete(&self, id: Uuid, vendor_id: Uuid) -> Result<(), RepositoryError>;
}
