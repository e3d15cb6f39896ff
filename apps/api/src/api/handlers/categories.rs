use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::auth::SessionUser;
use crate::domain::catalog::Category;
use crate::domain::repositories::CategoryRepository;
use crate::infrastructure::repositories::PostgresCategoryRepository;
use crate::state::AppState;

/// Request body for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// List all categories
///
/// GET /api/categories
pub async fn list_categories(
    _session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = PostgresCategoryRepository::new(state.pool).list().await?;
    Ok(Json(categories))
}

/// Create a category
///
/// POST /api/categories
pub async fn create_category(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    session.require_supplier()?;
    let category = Category::new(req.name, req.description, req.icon)?;

    PostgresCategoryRepository::new(state.pool)
        .create(&category)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}
