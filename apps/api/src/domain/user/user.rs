use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::value_objects::{Email, UserRole};
use crate::domain::errors::{DomainError, Validator};

/// Credit score assigned to new accounts
pub const DEFAULT_CREDIT_SCORE: i32 = 650;

/// Optional business details shown to trading partners
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BusinessProfile {
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}

impl BusinessProfile {
    fn validate(&self, v: &mut Validator) {
        v.optional_text(self.business_name.as_deref(), "business_name", 200)
            .optional_text(self.business_type.as_deref(), "business_type", 100)
            .optional_text(self.location.as_deref(), "location", 200)
            .optional_text(self.phone.as_deref(), "phone", 32);
    }
}

/// A marketplace account
///
/// The credit score is a stored attribute; nothing in the backend computes it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub profile: BusinessProfile,
    pub credit_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a new account, validating names and profile fields
    pub fn register(
        email: Email,
        password_hash: String,
        first_name: String,
        last_name: String,
        role: UserRole,
        profile: BusinessProfile,
    ) -> Result<Self, DomainError> {
        let mut v = Validator::new();
        v.text(&first_name, "first_name", 100)
            .text(&last_name, "last_name", 100);
        profile.validate(&mut v);
        v.finish()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            role,
            profile,
            credit_score: DEFAULT_CREDIT_SCORE,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the editable profile of the account
    pub fn update_profile(
        &mut self,
        first_name: String,
        last_name: String,
        profile: BusinessProfile,
    ) -> Result<(), DomainError> {
        let mut v = Validator::new();
        v.text(&first_name, "first_name", 100)
            .text(&last_name, "last_name", 100);
        profile.validate(&mut v);
        v.finish()?;

        self.first_name = first_name.trim().to_string();
        self.last_name = last_name.trim().to_string();
        self.profile = profile;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Business name when set, otherwise the person's full name
    pub fn display_name(&self) -> String {
        match &self.profile.business_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(first: &str, profile: BusinessProfile) -> Result<User, DomainError> {
        User::register(
            Email::new("owner@shop.test").unwrap(),
            "hash".to_string(),
            first.to_string(),
            "Okafor".to_string(),
            UserRole::Vendor,
            profile,
        )
    }

    #[test]
    fn register_sets_defaults() {
        let user = register("Ada", BusinessProfile::default()).unwrap();
        assert_eq!(user.credit_score, DEFAULT_CREDIT_SCORE);
        assert_eq!(user.role, UserRole::Vendor);
        assert_eq!(user.display_name(), "Ada Okafor");
    }

    #[test]
    fn register_rejects_blank_first_name() {
        let err = register("  ", BusinessProfile::default()).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "first_name");
    }

    #[test]
    fn register_rejects_long_phone() {
        let profile = BusinessProfile {
            phone: Some("1".repeat(40)),
            ..Default::default()
        };
        let err = register("Ada", profile).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "phone");
    }

    #[test]
    fn display_name_prefers_business_name() {
        let profile = BusinessProfile {
            business_name: Some("Ada's Kitchen".to_string()),
            ..Default::default()
        };
        let user = register("Ada", profile).unwrap();
        assert_eq!(user.display_name(), "Ada's Kitchen");
    }

    #[test]
    fn update_profile_trims_names() {
        let mut user = register("Ada", BusinessProfile::default()).unwrap();
        user.update_profile(" Grace ".to_string(), "Hopper".to_string(), BusinessProfile::default())
            .unwrap();
        assert_eq!(user.first_name, "Grace");
    }
}
