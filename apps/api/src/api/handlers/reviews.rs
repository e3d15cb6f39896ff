use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::middleware::auth::SessionUser;
use crate::domain::repositories::{ReviewRepository, UserRepository};
use crate::domain::review::{Review, ReviewDraft, SupplierRating};
use crate::domain::user::UserRole;
use crate::infrastructure::repositories::{PostgresReviewRepository, PostgresUserRepository};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub supplier_id: Uuid,
}

/// Reviews of a supplier
///
/// GET /api/reviews?supplier_id=
pub async fn list_reviews(
    _session: SessionUser,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReviewQuery>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = PostgresReviewRepository::new(state.pool)
        .find_by_supplier(query.supplier_id)
        .await?;
    Ok(Json(reviews))
}

/// Average rating of a supplier
///
/// GET /api/suppliers/:id/rating
pub async fn supplier_rating(
    _session: SessionUser,
    State(state): State<AppState>,
    ApiPath(supplier_id): ApiPath<Uuid>,
) -> Result<Json<SupplierRating>, ApiError> {
    let rating = PostgresReviewRepository::new(state.pool)
        .rating_for_supplier(supplier_id)
        .await?;
    Ok(Json(rating))
}

/// Review a supplier
///
/// POST /api/reviews
pub async fn create_review(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ReviewDraft>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let reviewer_id = session.require_vendor()?;
    let review = Review::write(reviewer_id, draft)?;

    PostgresUserRepository::new(state.pool.clone())
        .find_by_id(review.supplier_id)
        .await?
        .filter(|user| user.role == UserRole::Supplier)
        .ok_or_else(|| ApiError::not_found(format!("Supplier not found: {}", review.supplier_id)))?;

    PostgresReviewRepository::new(state.pool)
        .create(&review)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
