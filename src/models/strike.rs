// src/models/strike.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{assign, assign_nullable, blank_to_none, double_option};
use crate::models::{Record, Stamp};

fn default_points() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Strike {
    pub id: String,
    pub member_id: String,
    pub issued_by: Option<String>,
    pub reason: Option<String>,
    #[schema(example = 1)]
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewStrike {
    #[serde(default)]
    #[validate(length(min = 1, message = "member_id is required"))]
    pub member_id: String,
    pub reason: Option<String>,
    #[serde(default = "default_points")]
    #[validate(range(min = 1, message = "Points must be at least 1"))]
    pub points: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StrikePatch {
    pub id: Option<String>,
    #[validate(length(min = 1, message = "member_id is required"))]
    pub member_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub reason: Option<Option<String>>,
    #[validate(range(min = 1, message = "Points must be at least 1"))]
    pub points: Option<i32>,
}

impl Record for Strike {
    type New = NewStrike;
    type Patch = StrikePatch;
    const ENTITY: &'static str = "Strike";

    fn id(&self) -> &str {
        &self.id
    }

    fn recency(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn build(id: String, stamp: &Stamp, new: NewStrike) -> Self {
        Self {
            id,
            member_id: new.member_id,
            issued_by: stamp.by.clone(),
            reason: blank_to_none(new.reason),
            points: new.points,
            created_at: stamp.at,
        }
    }

    fn apply(&mut self, patch: StrikePatch, _stamp: &Stamp) {
        assign(&mut self.member_id, patch.member_id);
        assign_nullable(&mut self.reason, patch.reason);
        assign(&mut self.points, patch.points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_default_to_one() {
        let payload: NewStrike = serde_json::from_str(r#"{"member_id": "m1"}"#).unwrap();
        assert_eq!(payload.points, 1);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn zero_points_are_rejected() {
        let payload: NewStrike = serde_json::from_str(r#"{"member_id": "m1", "points": 0}"#).unwrap();
        assert!(payload.validate().unwrap_err().field_errors().contains_key("points"));
    }
}
