// src/handlers/inventory.rs

//! Inventory is a history of quantity snapshots. POST appends a row,
//! PATCH corrects one row in place, and there is no DELETE.

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::ApiJson, patch::require_id},
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::inventory::{Inventory, InventoryPatch, NewInventory},
    services::{crud_service, inventory_service},
};

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses(
        (status = 200, description = "Every inventory row, most recently updated first", body = Vec<Inventory>)
    )
)]
pub async fn list_inventory(State(app_state): State<AppState>) -> Result<Json<Vec<Inventory>>, AppError> {
    Ok(Json(app_state.inventory.list(None).await?))
}

// GET /api/inventory/current
#[utoipa::path(
    get,
    path = "/api/inventory/current",
    tag = "Inventory",
    responses(
        (status = 200, description = "Latest row per resource", body = Vec<Inventory>)
    )
)]
pub async fn current_inventory(State(app_state): State<AppState>) -> Result<Json<Vec<Inventory>>, AppError> {
    let rows = app_state.inventory.list(None).await?;
    Ok(Json(inventory_service::current_levels(rows)))
}

// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = NewInventory,
    responses(
        (status = 200, description = "Snapshot recorded", body = Vec<Inventory>),
        (status = 400, description = "Invalid payload")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn record_inventory(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<NewInventory>,
) -> Result<Json<Vec<Inventory>>, AppError> {
    payload.validate()?;

    let created =
        crud_service::create::<Inventory, _>(app_state.inventory.as_ref(), admin.stamp(), payload).await?;
    Ok(Json(created))
}

// PATCH /api/inventory
#[utoipa::path(
    patch,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = InventoryPatch,
    responses(
        (status = 200, description = "Row updated", body = Vec<Inventory>),
        (status = 400, description = "Missing ID or invalid quantity"),
        (status = 404, description = "Inventory row not found")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_inventory(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<InventoryPatch>,
) -> Result<Json<Vec<Inventory>>, AppError> {
    let id = require_id(payload.id.as_deref())?;
    payload.validate()?;

    let updated =
        crud_service::update::<Inventory, _>(app_state.inventory.as_ref(), &id, payload, admin.stamp()).await?;
    Ok(Json(updated))
}
