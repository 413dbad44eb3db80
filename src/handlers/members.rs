// src/handlers/members.rs

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
    models::member::{Member, MemberPatch, NewMember},
    services::crud_service,
};

// GET /api/members
#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Members",
    responses(
        (status = 200, description = "All members, newest first", body = Vec<Member>)
    )
)]
pub async fn list_members(State(app_state): State<AppState>) -> Result<Json<Vec<Member>>, AppError> {
    let members = app_state.members.list(None).await?;
    Ok(Json(members))
}

// POST /api/members
#[utoipa::path(
    post,
    path = "/api/members",
    tag = "Members",
    request_body = NewMember,
    responses(
        (status = 200, description = "Member created", body = Vec<Member>),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Admin role required")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_member(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<NewMember>,
) -> Result<Json<Vec<Member>>, AppError> {
    payload.validate()?;

    let created = crud_service::create::<Member, _>(app_state.members.as_ref(), admin.stamp(), payload).await?;
    Ok(Json(created))
}

// PATCH /api/members
#[utoipa::path(
    patch,
    path = "/api/members",
    tag = "Members",
    request_body = MemberPatch,
    responses(
        (status = 200, description = "Member updated", body = Vec<Member>),
        (status = 400, description = "Missing ID or invalid field"),
        (status = 404, description = "Member not found")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_member(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<MemberPatch>,
) -> Result<Json<Vec<Member>>, AppError> {
    let id = require_id(payload.id.as_deref())?;
    payload.validate()?;

    let updated =
        crud_service::update::<Member, _>(app_state.members.as_ref(), &id, payload, admin.stamp()).await?;
    Ok(Json(updated))
}

// DELETE /api/members/{id}
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    tag = "Members",
    params(
        ("id" = String, Path, description = "Member ID")
    ),
    responses(
        (status = 204, description = "Member removed (or never existed)")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_member(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.members.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
