// src/models/member.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{assign, assign_nullable, blank_to_none, double_option};
use crate::models::{Record, Stamp};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    #[schema(example = "a1b2c3d4e")]
    pub id: String,
    #[schema(example = "Big Smoke")]
    pub name: String,
    pub tag: Option<String>,
    pub notes: Option<String>,
    pub added_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewMember {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "Tag must be at most 255 characters"))]
    pub tag: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MemberPatch {
    pub id: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255, message = "Tag must be at most 255 characters"))]
    pub tag: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl Record for Member {
    type New = NewMember;
    type Patch = MemberPatch;
    const ENTITY: &'static str = "Member";

    fn id(&self) -> &str {
        &self.id
    }

    fn recency(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn build(id: String, stamp: &Stamp, new: NewMember) -> Self {
        Self {
            id,
            name: new.name,
            tag: blank_to_none(new.tag),
            notes: blank_to_none(new.notes),
            added_by: stamp.by.clone(),
            created_at: stamp.at,
        }
    }

    fn apply(&mut self, patch: MemberPatch, _stamp: &Stamp) {
        assign(&mut self.name, patch.name);
        assign_nullable(&mut self.tag, patch.tag);
        assign_nullable(&mut self.notes, patch.notes);
    }
}
