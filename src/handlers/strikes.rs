// src/handlers/strikes.rs

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
    models::{
        dashboard::MemberWithStrikes,
        strike::{NewStrike, Strike, StrikePatch},
    },
    services::{crud_service, strike_service},
};

#[utoipa::path(
    get,
    path = "/api/strikes",
    tag = "Strikes",
    responses(
        (status = 200, description = "Strikes, newest first", body = Vec<Strike>)
    )
)]
pub async fn list_strikes(State(app_state): State<AppState>) -> Result<Json<Vec<Strike>>, AppError> {
    Ok(Json(app_state.strikes.list(None).await?))
}

/// Every member with their strike count and point total, heaviest first.
#[utoipa::path(
    get,
    path = "/api/strikes/summary",
    tag = "Strikes",
    responses(
        (status = 200, description = "Per-member strike totals", body = Vec<MemberWithStrikes>)
    )
)]
pub async fn strike_summary(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MemberWithStrikes>>, AppError> {
    let (members, strikes) = tokio::try_join!(app_state.members.list(None), app_state.strikes.list(None))?;
    Ok(Json(strike_service::summarize_strikes(members, &strikes)))
}

#[utoipa::path(
    post,
    path = "/api/strikes",
    tag = "Strikes",
    request_body = NewStrike,
    responses(
        (status = 200, description = "Strike issued", body = Vec<Strike>),
        (status = 400, description = "Invalid payload")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn issue_strike(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<NewStrike>,
) -> Result<Json<Vec<Strike>>, AppError> {
    payload.validate()?;

    let created = crud_service::create::<Strike, _>(app_state.strikes.as_ref(), admin.stamp(), payload).await?;
    Ok(Json(created))
}

#[utoipa::path(
    patch,
    path = "/api/strikes",
    tag = "Strikes",
    request_body = StrikePatch,
    responses(
        (status = 200, description = "Strike updated", body = Vec<Strike>),
        (status = 400, description = "Missing ID or invalid field"),
        (status = 404, description = "Strike not found")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_strike(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<StrikePatch>,
) -> Result<Json<Vec<Strike>>, AppError> {
    let id = require_id(payload.id.as_deref())?;
    payload.validate()?;

    let updated =
        crud_service::update::<Strike, _>(app_state.strikes.as_ref(), &id, payload, admin.stamp()).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/strikes/{id}",
    tag = "Strikes",
    params(
        ("id" = String, Path, description = "Strike ID")
    ),
    responses(
        (status = 204, description = "Strike removed")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_strike(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.strikes.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
