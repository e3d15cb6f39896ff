use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::errors::{DomainError, Validator};

/// Product category
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(
        name: String,
        description: Option<String>,
        icon: Option<String>,
    ) -> Result<Self, DomainError> {
        Validator::new()
            .text(&name, "name", 100)
            .optional_text(description.as_deref(), "description", 500)
            .optional_text(icon.as_deref(), "icon", 64)
            .finish()?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description,
            icon,
            created_at: Utc::now(),
        })
    }
}
