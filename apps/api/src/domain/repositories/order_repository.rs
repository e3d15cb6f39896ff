use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::order::{Order, OrderStatus};

/// Repository trait for Order aggregate
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the order and reserve its quantity from product stock
    ///
    /// Fails with `RepositoryError::Conflict` when stock ran out meanwhile.
    async fn create(&self, order: &Order) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError>;

    /// Orders placed by a vendor, newest first
    async fn find_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Order>, RepositoryError>;

    /// Orders received by a supplier, newest first
    async fn find_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<Order>, RepositoryError>;

    /// Persist a status change; a cancellation returns the quantity to stock
    ///
    /// The write applies only while the stored status is still `previous`,
    /// the status the transition was checked from. Fails with
    /// `RepositoryError::Conflict` otherwise.
    async fn update_status(
        &self,
        order: &Order,
        previous: OrderStatus,
    ) -> Result<(), RepositoryError>;
}
