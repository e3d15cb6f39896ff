use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::middleware::auth::SessionUser;
use crate::domain::catalog::{Product, ProductDraft, ProductFilter};
use crate::domain::repositories::ProductRepository;
use crate::infrastructure::repositories::PostgresProductRepository;
use crate::state::AppState;

/// Loads a product owned by `supplier_id`; anyone else's product reads as missing
async fn owned_product(
    repo: &PostgresProductRepository,
    id: Uuid,
    supplier_id: Uuid,
) -> Result<Product, ApiError> {
    repo.find_by_id(id)
        .await?
        .filter(|product| product.is_owned_by(supplier_id))
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", id)))
}

/// List active products
///
/// GET /api/products?category_id=&supplier_id=&search=
pub async fn list_products(
    _session: SessionUser,
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProductFilter>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = PostgresProductRepository::new(state.pool)
        .list(&filter)
        .await?;
    Ok(Json(products))
}

/// Get a product by ID
///
/// GET /api/products/:id
pub async fn get_product(
    _session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Product>, ApiError> {
    let product = PostgresProductRepository::new(state.pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", id)))?;

    Ok(Json(product))
}

/// Create a product listing
///
/// POST /api/products
pub async fn create_product(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let supplier_id = session.require_supplier()?;
    let product = Product::create(supplier_id, draft)?;

    PostgresProductRepository::new(state.pool)
        .create(&product)
        .await?;

    tracing::info!(product_id = %product.id, %supplier_id, "product listed");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's editable fields
///
/// PUT /api/products/:id
pub async fn update_product(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> Result<Json<Product>, ApiError> {
    let supplier_id = session.require_supplier()?;
    draft.validate()?;

    let repo = PostgresProductRepository::new(state.pool);
    let mut product = owned_product(&repo, id, supplier_id).await?;
    product.revise(draft)?;
    repo.update(&product).await?;

    Ok(Json(product))
}

/// Withdraw a product from the catalog
///
/// DELETE /api/products/:id
pub async fn delete_product(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let supplier_id = session.require_supplier()?;

    let repo = PostgresProductRepository::new(state.pool);
    owned_product(&repo, id, supplier_id).await?;
    repo.deactivate(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
