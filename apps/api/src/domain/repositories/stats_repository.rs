use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::stats::{SupplierStats, VendorStats};

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn vendor_stats(&self, vendor_id: Uuid) -> Result<VendorStats, RepositoryError>;

    async fn supplier_stats(&self, supplier_id: Uuid) -> Result<SupplierStats, RepositoryError>;
}
