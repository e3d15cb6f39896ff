// Session token creation and verification
// The token travels in the session cookie or an Authorization header

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;
use crate::domain::user::UserRole;

/// Session claims
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `role` - Marketplace role at sign-in
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: usize,
}

/// Creates a session token for a user, valid for `ttl_hours`
///
/// # Example
/// ```
/// use vendorlink_api::auth::jwt::create_token;
/// use vendorlink_api::domain::user::UserRole;
/// use uuid::Uuid;
///
/// let token = create_token(Uuid::new_v4(), UserRole::Vendor, "secret", 8).expect("valid token");
/// assert!(!token.is_empty());
/// ```
pub fn create_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, AuthError> {
    let expiry = Utc::now() + Duration::hours(ttl_hours);
    let claims = Claims {
        sub: user_id,
        role,
        exp: expiry.timestamp().max(0) as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

/// Verifies a session token, rejecting bad signatures and expired tokens
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
