// src/handlers/dashboard.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError, config::AppState, models::dashboard::DashboardSummary,
    services::dashboard_service,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Headline counts and the latest completions", body = DashboardSummary)
    )
)]
pub async fn get_summary(State(app_state): State<AppState>) -> Result<Json<DashboardSummary>, AppError> {
    let summary = dashboard_service::get_summary(&app_state).await?;
    Ok(Json(summary))
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Service is up", body = String)
    )
)]
pub async fn health() -> &'static str {
    "OK"
}
