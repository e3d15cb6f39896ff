use serde::{Deserialize, Serialize};
use std::fmt;

/// Email value object representing a normalised email address
///
/// # Invariants
/// - Must contain '@' character
/// - Must be at least 3 characters long
/// - Stored trimmed and lowercased so lookups are case-insensitive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use vendorlink_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new(" Buyer@Example.com ").expect("valid email");
    /// assert_eq!(email.as_str(), "buyer@example.com");
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, String> {
        let email = email.as_ref().trim().to_lowercase();
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(format!("Invalid email: {}", email))
        }
    }

    fn is_valid(email: &str) -> bool {
        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        }
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marketplace role of an account
///
/// Vendors buy; suppliers list products and fulfil orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Vendor,
    Supplier,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Vendor => write!(f, "vendor"),
            UserRole::Supplier => write!(f, "supplier"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_business_addresses() {
        for address in ["orders@greenfarm.co", "procurement@north.depot.example"] {
            assert!(Email::new(address).is_ok(), "{address}");
        }
    }

    #[test]
    fn email_is_normalised() {
        let email = Email::new("  Sales@Supplier.IO").unwrap();
        assert_eq!(email.as_str(), "sales@supplier.io");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for address in ["", "   ", "greenfarm.co", "orders@", "@greenfarm.co", "a@b@c"] {
            assert!(Email::new(address).is_err(), "{address:?}");
        }
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Supplier).unwrap(), "\"supplier\"");
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }

    #[test]
    fn role_display() {
        assert_eq!(UserRole::Vendor.to_string(), "vendor");
        assert_eq!(UserRole::Supplier.to_string(), "supplier");
    }
}
