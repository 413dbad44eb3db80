// src/handlers/crafted_items.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, extract::ApiJson, patch::require_id},
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::crafted_item::{CraftedItem, CraftedItemPatch, NewCraftedItem},
    services::crud_service,
};

#[utoipa::path(
    get,
    path = "/api/crafted-items",
    tag = "Crafted items",
    responses(
        (status = 200, description = "Crafting log, newest first", body = Vec<CraftedItem>)
    )
)]
pub async fn list_crafted_items(State(app_state): State<AppState>) -> Result<Json<Vec<CraftedItem>>, AppError> {
    Ok(Json(app_state.crafted_items.list(None).await?))
}

#[utoipa::path(
    post,
    path = "/api/crafted-items",
    tag = "Crafted items",
    request_body = NewCraftedItem,
    responses(
        (status = 200, description = "Crafted item logged", body = Vec<CraftedItem>),
        (status = 400, description = "Invalid payload")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_crafted_item(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<NewCraftedItem>,
) -> Result<Json<Vec<CraftedItem>>, AppError> {
    payload.validate()?;

    let created =
        crud_service::create::<CraftedItem, _>(app_state.crafted_items.as_ref(), admin.stamp(), payload).await?;
    Ok(Json(created))
}

#[utoipa::path(
    patch,
    path = "/api/crafted-items",
    tag = "Crafted items",
    request_body = CraftedItemPatch,
    responses(
        (status = 200, description = "Crafted item updated", body = Vec<CraftedItem>),
        (status = 400, description = "Missing ID or invalid field"),
        (status = 404, description = "Item not found")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_crafted_item(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<CraftedItemPatch>,
) -> Result<Json<Vec<CraftedItem>>, AppError> {
    let id = require_id(payload.id.as_deref())?;
    payload.validate()?;

    let updated =
        crud_service::update::<CraftedItem, _>(app_state.crafted_items.as_ref(), &id, payload, admin.stamp())
            .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/crafted-items/{id}",
    tag = "Crafted items",
    params(
        ("id" = String, Path, description = "Crafted item ID")
    ),
    responses(
        (status = 204, description = "Crafted item removed")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_crafted_item(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.crafted_items.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
