use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::user::{Email, User};

/// Repository trait for User accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; a taken email yields `RepositoryError::Conflict`
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Persist names and business profile
    async fn update_profile(&self, user: &User) -> Result<(), RepositoryError>;
}
