// src/services/dashboard_service.rs

use crate::{common::error::AppError, config::AppState, models::dashboard::DashboardSummary};

pub const RECENT_COMPLETIONS: i64 = 10;

pub async fn get_summary(app_state: &AppState) -> Result<DashboardSummary, AppError> {
    let (members, resources, tasks, recent_completions) = tokio::try_join!(
        app_state.members.list(None),
        app_state.resources.list(None),
        app_state.tasks.list(None),
        app_state.task_completions.list(Some(RECENT_COMPLETIONS)),
    )?;

    Ok(DashboardSummary {
        total_members: members.len(),
        total_resources: resources.len(),
        total_tasks: tasks.len(),
        recent_completions,
    })
}
