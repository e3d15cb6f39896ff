// Password hashing utilities
// Uses bcrypt for secure password hashing

use bcrypt::{hash, verify, DEFAULT_COST};

use super::AuthError;

/// Minimum accepted password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// bcrypt ignores input past 72 bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Returns a message describing why `password` is unacceptable, if it is
pub fn password_problem(password: &str) -> Option<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        Some(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))
    } else if password.len() > MAX_PASSWORD_BYTES {
        Some(format!("Password must be at most {MAX_PASSWORD_BYTES} bytes"))
    } else {
        None
    }
}

/// Hashes a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Verifies a password against a bcrypt hash
///
/// # Example
/// ```
/// use vendorlink_api::auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("my_password").unwrap();
/// assert!(verify_password("my_password", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("test_password_123").expect("valid hash");
        assert!(verify_password("test_password_123", &hash).expect("valid verification"));
        assert!(!verify_password("wrong_password", &hash).expect("valid verification"));
    }

    #[test]
    fn hashes_are_salted() {
        let hash1 = hash_password("test_password_123").unwrap();
        let hash2 = hash_password("test_password_123").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn short_password_rejected() {
        assert!(password_problem("short").is_some());
        assert!(password_problem("long enough").is_none());
    }

    #[test]
    fn overlong_password_rejected() {
        assert!(password_problem(&"x".repeat(73)).is_some());
    }
}
