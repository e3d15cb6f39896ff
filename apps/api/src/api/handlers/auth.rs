use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::auth::{clear_session_cookie, session_cookie, SessionUser};
use crate::auth::jwt::create_token;
use crate::auth::password::{hash_password, password_problem, verify_password};
use crate::domain::errors::FieldError;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{BusinessProfile, Email, User, UserRole};
use crate::infrastructure::repositories::PostgresUserRepository;
use crate::state::AppState;

/// Request body for account registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(flatten)]
    pub profile: BusinessProfile,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for profile updates
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub profile: BusinessProfile,
}

/// Public view of an account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub role: UserRole,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub credit_score: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            display_name: user.display_name(),
            role: user.role,
            business_name: user.profile.business_name.clone(),
            business_type: user.profile.business_type.clone(),
            location: user.profile.location.clone(),
            phone: user.profile.phone.clone(),
            credit_score: user.credit_score,
            created_at: user.created_at,
        }
    }
}

/// Response carrying a fresh session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Issues a session token and wraps it into a response with the cookie set
fn start_session(state: &AppState, status: StatusCode, user: &User) -> Result<Response, ApiError> {
    let config = &state.config;
    let token = create_token(user.id, user.role, &config.session_secret, config.session_ttl_hours)?;
    let cookie = session_cookie(&token, config.session_ttl_hours, config.cookie_secure);

    let body = SessionResponse {
        token,
        user: UserResponse::from(user),
    };
    Ok((status, [(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// Register a new vendor or supplier account
///
/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<Response, ApiError> {
    let mut problems = Vec::new();
    let email = Email::new(&req.email);
    if let Err(message) = &email {
        problems.push(FieldError {
            field: "email".to_string(),
            message: message.clone(),
        });
    }
    if let Some(message) = password_problem(&req.password) {
        problems.push(FieldError {
            field: "password".to_string(),
            message,
        });
    }
    let email = match email {
        Ok(email) if problems.is_empty() => email,
        _ => return Err(ApiError::validation(problems)),
    };

    let password_hash = hash_password(&req.password)?;
    let user = User::register(
        email,
        password_hash,
        req.first_name,
        req.last_name,
        req.role,
        req.profile,
    )?;

    PostgresUserRepository::new(state.pool.clone())
        .create(&user)
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "account registered");
    start_session(&state, StatusCode::CREATED, &user)
}

/// Login with email and password
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let email = Email::new(&req.email).map_err(|_| ApiError::unauthorized("Invalid credentials"))?;

    let user = PostgresUserRepository::new(state.pool.clone())
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    start_session(&state, StatusCode::OK, &user)
}

/// Drop the session cookie
///
/// POST /api/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(state.config.cookie_secure))],
    )
}

/// The signed-in account
///
/// GET /api/auth/user
pub async fn current_user(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = PostgresUserRepository::new(state.pool)
        .find_by_id(session.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(Json(UserResponse::from(&user)))
}

/// Update names and business profile of the signed-in account
///
/// PUT /api/auth/user
pub async fn update_current_user(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = PostgresUserRepository::new(state.pool);
    let mut user = repo
        .find_by_id(session.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    user.update_profile(req.first_name, req.last_name, req.profile)?;
    repo.update_profile(&user).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
