use axum::{extract::State, Json};

use crate::api::errors::ApiError;
use crate::api::middleware::auth::SessionUser;
use crate::domain::repositories::StatsRepository;
use crate::domain::stats::{SupplierStats, VendorStats};
use crate::infrastructure::repositories::PostgresStatsRepository;
use crate::state::AppState;

/// GET /api/stats/vendor
pub async fn vendor_stats(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<VendorStats>, ApiError> {
    let vendor_id = session.require_vendor()?;
    let stats = PostgresStatsRepository::new(state.pool)
        .vendor_stats(vendor_id)
        .await?;
    Ok(Json(stats))
}

/// GET /api/stats/supplier
pub async fn supplier_stats(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<SupplierStats>, ApiError> {
    let supplier_id = session.require_supplier()?;
    let stats = PostgresStatsRepository::new(state.pool)
        .supplier_stats(supplier_id)
        .await?;
    Ok(Json(stats))
}
