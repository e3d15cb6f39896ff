use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::group_order::{GroupOrder, Participant};

/// Repository trait for GroupOrder aggregate
#[async_trait]
pub trait GroupOrderRepository: Send + Sync {
    async fn create(&self, group_order: &GroupOrder) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupOrder>, RepositoryError>;

    /// Active group orders whose deadline has not passed, soonest deadline first
    async fn list_open(&self) -> Result<Vec<GroupOrder>, RepositoryError>;

    async fn participants(&self, group_order_id: Uuid) -> Result<Vec<Participant>, RepositoryError>;

    /// Atomically adds `vendor_id` with `quantity` and returns the updated order
    ///
    /// The capacity, status, and deadline checks and the counter increments
    /// happen in one conditional statement inside a transaction together with
    /// the participant insert. Returns `RepositoryError::Conflict` when the
    /// group order is full, closed, already joined by the vendor, or cannot
    /// hold `quantity` more units.
    async fn join(
        &self,
        group_order_id: Uuid,
        vendor_id: Uuid,
        quantity: i32,
    ) -> Result<GroupOrder, RepositoryError>;

    /// Cancels an open group order created by `creator_id`
    ///
    /// The status, deadline, and creator are checked by the same statement
    /// that writes the new status. Returns `RepositoryError::Conflict` when
    /// the group order completed, expired, or was cancelled meanwhile.
    async fn cancel(
        &self,
        group_order_id: Uuid,
        creator_id: Uuid,
    ) -> Result<GroupOrder, RepositoryError>;
}
