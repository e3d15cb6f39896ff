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
use crate::domain::order::{Order, OrderStatus};
use crate::domain::repositories::{OrderRepository, ProductRepository};
use crate::domain::user::UserRole;
use crate::infrastructure::repositories::{PostgresOrderRepository, PostgresProductRepository};
use crate::state::AppState;

/// Request body for placing an order
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

/// Request body for a status change
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub supplier_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            vendor_id: order.vendor_id(),
            supplier_id: order.supplier_id(),
            product_id: order.product_id(),
            quantity: order.quantity(),
            unit_price: order.unit_price(),
            total_amount: order.total_amount(),
            status: order.status(),
            delivery_address: order.delivery_address().map(str::to_string),
            notes: order.notes().map(str::to_string),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

fn order_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("Order not found: {}", id))
}

/// Orders placed (vendor) or received (supplier) by the caller
///
/// GET /api/orders
pub async fn list_orders(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let repo = PostgresOrderRepository::new(state.pool);
    let orders = match session.role {
        UserRole::Vendor => repo.find_by_vendor(session.id).await?,
        UserRole::Supplier => repo.find_by_supplier(session.id).await?,
    };

    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}

/// Get one of the caller's orders
///
/// GET /api/orders/:id
pub async fn get_order(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = PostgresOrderRepository::new(state.pool)
        .find_by_id(id)
        .await?
        .filter(|order| order.is_party(session.id))
        .ok_or_else(|| order_not_found(id))?;

    Ok(Json(OrderResponse::from(&order)))
}

/// Place an order with a supplier
///
/// POST /api/orders
pub async fn create_order(
    session: SessionUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let vendor_id = session.require_vendor()?;

    let product = PostgresProductRepository::new(state.pool.clone())
        .find_by_id(req.product_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", req.product_id)))?;

    let order = Order::place(
        vendor_id,
        &product,
        req.quantity,
        req.delivery_address,
        req.notes,
    )?;

    PostgresOrderRepository::new(state.pool)
        .create(&order)
        .await?;

    tracing::info!(order_id = %order.id(), %vendor_id, total = %order.total_amount(), "order placed");
    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}

/// Move an order along its fulfilment lifecycle
///
/// PATCH /api/orders/:id/status
pub async fn update_order_status(
    session: SessionUser,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let repo = PostgresOrderRepository::new(state.pool);
    let mut order = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| order_not_found(id))?;

    let previous = order.status();
    order.change_status(session.id, session.role, req.status)?;
    repo.update_status(&order, previous).await?;

    tracing::info!(order_id = %id, from = %previous, to = %order.status(), "order status changed");

    Ok(Json(OrderResponse::from(&order)))
}
