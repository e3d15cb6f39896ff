use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::middleware::auth::SessionUser;
use crate::domain::price_alert::{PriceAlert, PriceAlertDraft, PriceAlertView};
use crate::domain::repositories::{PriceAlertRepository, ProductRepository};
use crate::infrastructure::repositories::{
    PostgresPriceAlertRepository, PostgresProductRepository,
};
use crate::state::AppState;

/// The caller's price alerts with current prices
///
/// GET /api/price-alerts
pub async fn list_price_alerts(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PriceAlertView>>, ApiError> {
    let vendor_id = session.require_vendor()?;
    let alerts = PostgresPriceAlertRepository::new(state.pool)
        .find_by_vendor(vendor_id)
        .await?;
    Ok(Json(alerts))
}

/// Watch a product's price
///
/// POST /api/price-alerts
pub async fn create_price_alert(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<PriceAlertDraft>,
) -> Result<(StatusCode, Json<PriceAlertView>), ApiError> {
    let vendor_id = session.require_vendor()?;
    let alert = PriceAlert::new(vendor_id, draft)?;

    let product = PostgresProductRepository::new(state.pool.clone())
        .find_by_id(alert.product_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", alert.product_id)))?;

    PostgresPriceAlertRepository::new(state.pool)
        .create(&alert)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PriceAlertView::new(alert, product.name, product.price)),
    ))
}

/// Remove one of the caller's price alerts
///
/// DELETE /api/price-alerts/:id
pub async fn delete_price_alert(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let vendor_id = session.require_vendor()?;
    PostgresPriceAlertRepository::new(state.pool)
        .delete(id, vendor_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
