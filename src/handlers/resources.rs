// src/handlers/resources.rs

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
    models::resource::{NewResource, Resource, ResourcePatch},
    services::crud_service,
};

#[utoipa::path(
    get,
    path = "/api/resources",
    tag = "Resources",
    responses(
        (status = 200, description = "Resource catalogue, newest first", body = Vec<Resource>)
    )
)]
pub async fn list_resources(State(app_state): State<AppState>) -> Result<Json<Vec<Resource>>, AppError> {
    Ok(Json(app_state.resources.list(None).await?))
}

/// Unit falls back to "pcs" when omitted.
#[utoipa::path(
    post,
    path = "/api/resources",
    tag = "Resources",
    request_body = NewResource,
    responses(
        (status = 200, description = "Resource created", body = Vec<Resource>),
        (status = 400, description = "Invalid payload")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_resource(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<NewResource>,
) -> Result<Json<Vec<Resource>>, AppError> {
    payload.validate()?;

    let created =
        crud_service::create::<Resource, _>(app_state.resources.as_ref(), admin.stamp(), payload).await?;
    Ok(Json(created))
}

#[utoipa::path(
    patch,
    path = "/api/resources",
    tag = "Resources",
    request_body = ResourcePatch,
    responses(
        (status = 200, description = "Resource updated", body = Vec<Resource>),
        (status = 400, description = "Missing ID or invalid field"),
        (status = 404, description = "Resource not found")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_resource(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<ResourcePatch>,
) -> Result<Json<Vec<Resource>>, AppError> {
    let id = require_id(payload.id.as_deref())?;
    payload.validate()?;

    let updated =
        crud_service::update::<Resource, _>(app_state.resources.as_ref(), &id, payload, admin.stamp()).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    tag = "Resources",
    params(
        ("id" = String, Path, description = "Resource ID")
    ),
    responses(
        (status = 204, description = "Resource removed")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_resource(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.resources.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
