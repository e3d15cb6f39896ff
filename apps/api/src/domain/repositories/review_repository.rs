use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::review::{Review, SupplierRating};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<(), RepositoryError>;

    /// Reviews of a supplier, newest first
    async fn find_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<Review>, RepositoryError>;

    async fn rating_for_supplier(&self, supplier_id: Uuid) -> Result<SupplierRating, RepositoryError>;
}
