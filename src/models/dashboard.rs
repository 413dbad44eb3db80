// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{member::Member, task_completion::TaskCompletion};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub total_members: usize,
    pub total_resources: usize,
    pub total_tasks: usize,
    pub recent_completions: Vec<TaskCompletion>,
}

// Member row plus its derived strike totals.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberWithStrikes {
    #[serde(flatten)]
    pub member: Member,
    pub strike_count: usize,
    pub total_strike_points: i64,
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct MemberTaskHistory {
    pub member_id: Option<String>,
    pub member_name: String,
    pub completion_count: usize,
    pub completed_count: usize,
    pub total_amount_collected: i64,
}
