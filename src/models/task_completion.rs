// src/models/task_completion.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{assign, assign_nullable, blank_to_none, double_option};
use crate::models::{Record, Stamp};

// Append-only log: several rows may exist for the same task, member and date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TaskCompletion {
    pub id: String,
    pub task_id: String,
    pub member_id: Option<String>,
    #[schema(value_type = String, format = Date, example = "2026-10-18")]
    pub date: NaiveDate,
    pub amount_collected: i32,
    pub completed: bool,
    pub noted_by: Option<String>,
    pub noted_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewTaskCompletion {
    #[serde(default)]
    #[validate(length(min = 1, message = "task_id is required"))]
    pub task_id: String,
    pub member_id: Option<String>,
    /// Defaults to today (UTC).
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Amount collected must be non-negative"))]
    pub amount_collected: i32,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TaskCompletionPatch {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub member_id: Option<Option<String>>,
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "Amount collected must be non-negative"))]
    pub amount_collected: Option<i32>,
    pub completed: Option<bool>,
}

impl Record for TaskCompletion {
    type New = NewTaskCompletion;
    type Patch = TaskCompletionPatch;
    const ENTITY: &'static str = "Completion";

    fn id(&self) -> &str {
        &self.id
    }

    fn recency(&self) -> DateTime<Utc> {
        self.noted_at
    }

    fn build(id: String, stamp: &Stamp, new: NewTaskCompletion) -> Self {
        Self {
            id,
            task_id: new.task_id,
            member_id: blank_to_none(new.member_id),
            date: new.date.unwrap_or_else(|| stamp.at.date_naive()),
            amount_collected: new.amount_collected,
            completed: new.completed,
            noted_by: stamp.by.clone(),
            noted_at: stamp.at,
        }
    }

    fn apply(&mut self, patch: TaskCompletionPatch, stamp: &Stamp) {
        assign_nullable(&mut self.member_id, patch.member_id);
        assign(&mut self.date, patch.date);
        assign(&mut self.amount_collected, patch.amount_collected);
        assign(&mut self.completed, patch.completed);
        self.noted_by = stamp.by.clone();
        self.noted_at = stamp.at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_defaults_to_the_stamp_day() {
        let stamp = Stamp::now(None);
        let payload: NewTaskCompletion = serde_json::from_str(r#"{"task_id": "t1"}"#).unwrap();
        let completion = TaskCompletion::build("c1".into(), &stamp, payload);

        assert_eq!(completion.date, stamp.at.date_naive());
        assert!(!completion.completed);
        assert_eq!(completion.amount_collected, 0);
    }

    #[test]
    fn explicit_date_is_parsed_as_calendar_day() {
        let payload: NewTaskCompletion =
            serde_json::from_str(r#"{"task_id": "t1", "date": "2026-10-01"}"#).unwrap();

        assert_eq!(payload.date, NaiveDate::from_ymd_opt(2026, 10, 1));
    }
}
