// src/handlers/orders.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        extract::{ApiJson, ApiQuery},
        patch::require_id,
    },
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::order::{NewOrder, Order, OrderPatch},
    services::{
        crud_service,
        order_service::{self, OrderView},
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    /// `active`, `history` or `all` (default).
    #[serde(default)]
    #[param(inline)]
    pub view: OrderView,
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Orders in the requested view, newest first", body = Vec<Order>),
        (status = 400, description = "Unknown view")
    )
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = app_state.orders.list(None).await?;
    Ok(Json(order_service::filter_orders(orders, query.view)))
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = NewOrder,
    responses(
        (status = 200, description = "Order created", body = Vec<Order>),
        (status = 400, description = "Invalid payload")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<NewOrder>,
) -> Result<Json<Vec<Order>>, AppError> {
    payload.validate()?;

    let created = crud_service::create::<Order, _>(app_state.orders.as_ref(), admin.stamp(), payload).await?;
    Ok(Json(created))
}

// PATCH /api/orders
// Status may move in any direction; the last write wins.
#[utoipa::path(
    patch,
    path = "/api/orders",
    tag = "Orders",
    request_body = OrderPatch,
    responses(
        (status = 200, description = "Order updated", body = Vec<Order>),
        (status = 400, description = "Missing ID or invalid field"),
        (status = 404, description = "Order not found")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<OrderPatch>,
) -> Result<Json<Vec<Order>>, AppError> {
    let id = require_id(payload.id.as_deref())?;
    payload.validate()?;

    let updated = crud_service::update::<Order, _>(app_state.orders.as_ref(), &id, payload, admin.stamp()).await?;
    Ok(Json(updated))
}

// DELETE /api/orders/{id}
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order removed")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.orders.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
