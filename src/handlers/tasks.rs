// src/handlers/tasks.rs

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
    models::task::{NewTask, Task, TaskPatch},
    services::crud_service,
};

#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "Task definitions, newest first", body = Vec<Task>)
    )
)]
pub async fn list_tasks(State(app_state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(app_state.tasks.list(None).await?))
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = NewTask,
    responses(
        (status = 200, description = "Task created", body = Vec<Task>),
        (status = 400, description = "Invalid payload")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<NewTask>,
) -> Result<Json<Vec<Task>>, AppError> {
    payload.validate()?;

    let created = crud_service::create::<Task, _>(app_state.tasks.as_ref(), admin.stamp(), payload).await?;
    Ok(Json(created))
}

#[utoipa::path(
    patch,
    path = "/api/tasks",
    tag = "Tasks",
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Task updated", body = Vec<Task>),
        (status = 400, description = "Missing ID or invalid field"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    admin: RequireAdmin,
    ApiJson(payload): ApiJson<TaskPatch>,
) -> Result<Json<Vec<Task>>, AppError> {
    let id = require_id(payload.id.as_deref())?;
    payload.validate()?;

    let updated = crud_service::update::<Task, _>(app_state.tasks.as_ref(), &id, payload, admin.stamp()).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task removed")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.tasks.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
