use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::auth::jwt::verify_token;
use crate::domain::user::UserRole;
use crate::state::AppState;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "vendorlink_session";

/// Authenticated caller, extracted from the session cookie or a bearer token
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(user: SessionUser) -> Result<String, ApiError> {
///     Ok(format!("Hello {} {}", user.role, user.id))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SessionUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl SessionUser {
    /// Returns the caller's id if they are a vendor, else 403
    pub fn require_vendor(&self) -> Result<Uuid, ApiError> {
        match self.role {
            UserRole::Vendor => Ok(self.id),
            UserRole::Supplier => Err(ApiError::forbidden("Only vendors can do this")),
        }
    }

    /// Returns the caller's id if they are a supplier, else 403
    pub fn require_supplier(&self) -> Result<Uuid, ApiError> {
        match self.role {
            UserRole::Supplier => Ok(self.id),
            UserRole::Vendor => Err(ApiError::forbidden("Only suppliers can do this")),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .or_else(|| {
                parts
                    .headers
                    .get_all(COOKIE)
                    .iter()
                    .filter_map(|value| value.to_str().ok())
                    .find_map(|header| cookie_value(header, SESSION_COOKIE))
            })
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let claims = verify_token(token, &state.config.session_secret)
            .map_err(|_| ApiError::unauthorized("Invalid or expired session"))?;

        Ok(SessionUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}

/// Extracts a bearer token; a malformed Authorization header is rejected
fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(Some)
        .ok_or_else(|| {
            ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
        })
}

/// Finds `name` in a `Cookie` request header
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str, ttl_hours: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl_hours.max(0) * 3600
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
