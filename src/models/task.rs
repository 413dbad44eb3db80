// src/models/task.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{assign, assign_nullable, blank_to_none, double_option};
use crate::models::{Record, Stamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "recurrence", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    #[default]
    Daily,
    Once,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: String,
    #[schema(example = "Collect autoparts")]
    pub title: String,
    pub description: Option<String>,
    pub resource_id: Option<String>,
    pub required_amount: i32,
    pub assigned_member_id: Option<String>,
    pub recurrence: Recurrence,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewTask {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub resource_id: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Required amount must be non-negative"))]
    pub required_amount: i32,
    pub assigned_member_id: Option<String>,
    #[serde(default)]
    pub recurrence: Recurrence,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TaskPatch {
    pub id: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub resource_id: Option<Option<String>>,
    #[validate(range(min = 0, message = "Required amount must be non-negative"))]
    pub required_amount: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub assigned_member_id: Option<Option<String>>,
    pub recurrence: Option<Recurrence>,
}

impl Record for Task {
    type New = NewTask;
    type Patch = TaskPatch;
    const ENTITY: &'static str = "Task";

    fn id(&self) -> &str {
        &self.id
    }

    fn recency(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn build(id: String, stamp: &Stamp, new: NewTask) -> Self {
        Self {
            id,
            title: new.title,
            description: blank_to_none(new.description),
            resource_id: blank_to_none(new.resource_id),
            required_amount: new.required_amount,
            assigned_member_id: blank_to_none(new.assigned_member_id),
            recurrence: new.recurrence,
            created_by: stamp.by.clone(),
            created_at: stamp.at,
        }
    }

    fn apply(&mut self, patch: TaskPatch, _stamp: &Stamp) {
        assign(&mut self.title, patch.title);
        assign_nullable(&mut self.description, patch.description);
        assign_nullable(&mut self.resource_id, patch.resource_id);
        assign(&mut self.required_amount, patch.required_amount);
        assign_nullable(&mut self.assigned_member_id, patch.assigned_member_id);
        assign(&mut self.recurrence, patch.recurrence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_omitted() {
        let payload: NewTask = serde_json::from_str(r#"{"title": "Run parts", "resource_id": ""}"#).unwrap();
        let task = Task::build("t1".into(), &Stamp::now(None), payload);

        assert_eq!(task.recurrence, Recurrence::Daily);
        assert_eq!(task.required_amount, 0);
        assert_eq!(task.resource_id, None);
    }

    #[test]
    fn unknown_recurrence_is_rejected() {
        let parsed = serde_json::from_str::<NewTask>(r#"{"title": "x", "recurrence": "weekly"}"#);
        assert!(parsed.is_err());
    }
}
