use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::{Category, Product, ProductFilter};
use crate::domain::errors::RepositoryError;

/// Repository trait for product categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name
    async fn list(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Insert a category; a duplicate name yields `RepositoryError::Conflict`
    async fn create(&self, category: &Category) -> Result<(), RepositoryError>;
}

/// Repository trait for product listings
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;

    /// Active products matching `filter`, newest first
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;

    /// Persist the editable fields of an existing product
    async fn update(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Hide a product from the catalog; existing orders keep referencing it
    async fn deactivate(&self, id: Uuid) -> Result<(), RepositoryError>;
}
