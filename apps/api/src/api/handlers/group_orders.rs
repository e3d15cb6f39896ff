use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::middleware::auth::SessionUser;
use crate::domain::group_order::{GroupOrder, GroupOrderDraft, GroupOrderStatus, Participant};
use crate::domain::repositories::{GroupOrderRepository, ProductRepository};
use crate::infrastructure::repositories::{
    PostgresGroupOrderRepository, PostgresProductRepository,
};
use crate::state::AppState;

/// Request body for joining a group order
#[derive(Debug, Deserialize)]
pub struct JoinGroupOrderRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct GroupOrderResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_quantity: i32,
    pub current_quantity: i32,
    pub max_participants: i32,
    pub current_participants: i32,
    pub discount_price: Decimal,
    pub deadline: DateTime<Utc>,
    pub status: GroupOrderStatus,
    pub progress_percent: i32,
    pub is_full: bool,
    pub created_at: DateTime<Utc>,
}

impl GroupOrderResponse {
    fn at(group_order: &GroupOrder, now: DateTime<Utc>) -> Self {
        Self {
            id: group_order.id(),
            product_id: group_order.product_id(),
            creator_id: group_order.creator_id(),
            title: group_order.title().to_string(),
            description: group_order.description().map(str::to_string),
            target_quantity: group_order.target_quantity(),
            current_quantity: group_order.current_quantity(),
            max_participants: group_order.max_participants(),
            current_participants: group_order.current_participants(),
            discount_price: group_order.discount_price(),
            deadline: group_order.deadline(),
            status: group_order.status_at(now),
            progress_percent: group_order.progress_percent(),
            is_full: group_order.is_full(),
            created_at: group_order.created_at(),
        }
    }
}

async fn find_group_order(
    repo: &PostgresGroupOrderRepository,
    id: Uuid,
) -> Result<GroupOrder, ApiError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Group order not found: {}", id)))
}

/// Open group orders, soonest deadline first
///
/// GET /api/group-orders
pub async fn list_group_orders(
    _session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupOrderResponse>>, ApiError> {
    let group_orders = PostgresGroupOrderRepository::new(state.pool)
        .list_open()
        .await?;

    let now = Utc::now();
    Ok(Json(
        group_orders
            .iter()
            .map(|g| GroupOrderResponse::at(g, now))
            .collect(),
    ))
}

/// Get a group order by ID
///
/// GET /api/group-orders/:id
pub async fn get_group_order(
    _session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<GroupOrderResponse>, ApiError> {
    let repo = PostgresGroupOrderRepository::new(state.pool);
    let group_order = find_group_order(&repo, id).await?;

    Ok(Json(GroupOrderResponse::at(&group_order, Utc::now())))
}

/// Vendors committed to a group order
///
/// GET /api/group-orders/:id/participants
pub async fn list_participants(
    _session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    let repo = PostgresGroupOrderRepository::new(state.pool);
    find_group_order(&repo, id).await?;

    Ok(Json(repo.participants(id).await?))
}

/// Open a group order on a product
///
/// POST /api/group-orders
pub async fn create_group_order(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<GroupOrderDraft>,
) -> Result<(StatusCode, Json<GroupOrderResponse>), ApiError> {
    let creator_id = session.require_vendor()?;

    let product = PostgresProductRepository::new(state.pool.clone())
        .find_by_id(draft.product_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", draft.product_id)))?;

    let now = Utc::now();
    let group_order = GroupOrder::open(creator_id, &product, draft, now)?;

    PostgresGroupOrderRepository::new(state.pool)
        .create(&group_order)
        .await?;

    tracing::info!(group_order_id = %group_order.id(), %creator_id, "group order opened");
    Ok((
        StatusCode::CREATED,
        Json(GroupOrderResponse::at(&group_order, now)),
    ))
}

/// Commit quantity to a group order
///
/// POST /api/group-orders/:id/join
pub async fn join_group_order(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<JoinGroupOrderRequest>,
) -> Result<Json<GroupOrderResponse>, ApiError> {
    let vendor_id = session.require_vendor()?;

    let repo = PostgresGroupOrderRepository::new(state.pool);
    let group_order = find_group_order(&repo, id).await?;

    // Early rejection with a precise message; the repository re-checks atomically
    let now = Utc::now();
    group_order.check_join(req.quantity, now)?;

    let updated = repo.join(id, vendor_id, req.quantity).await?;

    tracing::info!(
        group_order_id = %id,
        %vendor_id,
        participants = updated.current_participants(),
        "vendor joined group order"
    );
    Ok(Json(GroupOrderResponse::at(&updated, Utc::now())))
}

/// Withdraw a group order
///
/// POST /api/group-orders/:id/cancel
pub async fn cancel_group_order(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<GroupOrderResponse>, ApiError> {
    let repo = PostgresGroupOrderRepository::new(state.pool);
    let group_order = find_group_order(&repo, id).await?;

    // Early rejection with a precise message; the repository re-checks atomically
    group_order.check_cancel(session.id, Utc::now())?;

    let cancelled = repo.cancel(id, session.id).await?;

    tracing::info!(group_order_id = %id, creator_id = %session.id, "group order cancelled");
    Ok(Json(GroupOrderResponse::at(&cancelled, Utc::now())))
}
