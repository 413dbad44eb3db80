// src/handlers/task_completions.rs

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
    models::{
        dashboard::MemberTaskHistory,
        task_completion::{NewTaskCompletion, TaskCompletion, TaskCompletionPatch},
    },
    services::{crud_service, task_history_service},
};

/// Upper bound on rows returned by the completion log.
pub const MAX_COMPLETIONS: i64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCompletionsQuery {
    /// Clamped to 1..=100.
    pub limit: Option<i64>,
}

impl ListCompletionsQuery {
    fn window(&self) -> i64 {
        self.limit.unwrap_or(MAX_COMPLETIONS).clamp(1, MAX_COMPLETIONS)
    }
}

// GET /api/task-completions
#[utoipa::path(
    get,
    path = "/api/task-completions",
    tag = "Task completions",
    params(ListCompletionsQuery),
    responses(
        (status = 200, description = "Most recent completions, newest first", body = Vec<TaskCompletion>),
        (status = 400, description = "Malformed query")
    )
)]
pub async fn list_completions(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<ListCompletionsQuery>,
) -> Result<Json<Vec<TaskCompletion>>, AppError> {
    let completions = app_state.task_completions.list(Some(query.window())).await?;
    Ok(Json(completions))
}

// GET /api/task-completions/summary
#[utoipa::path(
    get,
    path = "/api/task-completions/summary",
    tag = "Task completions",
    responses(
        (status = 200, description = "Completion totals per member", body = Vec<MemberTaskHistory>)
    )
)]
pub async fn completion_summary(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MemberTaskHistory>>, AppError> {
    let (members, completions) =
        tokio::try_join!(app_state.members.list(None), app_state.task_completions.list(None))?;

    Ok(Json(task_history_service::summarize_completions(&members, &completions)))
}

// POST /api/task-completions
#[utoipa::path(
    post,
    path = "/api/task-completions",
    tag = "Task completions",
    request_body = NewTaskCompletion,
    responses(
        (status = 200, description = "Completion logged", body = Vec<TaskCompletion>),
        (status = 400, description = "Invalid payload")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_completion(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<NewTaskCompletion>,
) -> Result<Json<Vec<TaskCompletion>>, AppError> {
    payload.validate()?;

    let created =
        crud_service::create::<TaskCompletion, _>(app_state.task_completions.as_ref(), admin.stamp(), payload)
            .await?;
    Ok(Json(created))
}

// PATCH /api/task-completions
#[utoipa::path(
    patch,
    path = "/api/task-completions",
    tag = "Task completions",
    request_body = TaskCompletionPatch,
    responses(
        (status = 200, description = "Completion updated", body = Vec<TaskCompletion>),
        (status = 400, description = "Missing ID or invalid field"),
        (status = 404, description = "Completion not found")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_completion(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<TaskCompletionPatch>,
) -> Result<Json<Vec<TaskCompletion>>, AppError> {
    let id = require_id(payload.id.as_deref())?;
    payload.validate()?;

    let updated = crud_service::update::<TaskCompletion, _>(
        app_state.task_completions.as_ref(),
        &id,
        payload,
        admin.stamp(),
    )
    .await?;
    Ok(Json(updated))
}

// DELETE /api/task-completions/{id}
#[utoipa::path(
    delete,
    path = "/api/task-completions/{id}",
    tag = "Task completions",
    params(
        ("id" = String, Path, description = "Completion ID")
    ),
    responses(
        (status = 204, description = "Completion removed")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_completion(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.task_completions.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
