// src/models/resource.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{assign, assign_nullable, blank_to_none, double_option};
use crate::models::{Record, Stamp};

pub const DEFAULT_UNIT: &str = "pcs";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Resource {
    pub id: String,
    #[schema(example = "Autoparts")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "pcs")]
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewResource {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 50, message = "Unit must be at most 50 characters"))]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResourcePatch {
    pub id: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1, max = 50, message = "Unit must be 1 to 50 characters"))]
    pub unit: Option<String>,
}

impl Record for Resource {
    type New = NewResource;
    type Patch = ResourcePatch;
    const ENTITY: &'static str = "Resource";

    fn id(&self) -> &str {
        &self.id
    }

    fn recency(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn build(id: String, stamp: &Stamp, new: NewResource) -> Self {
        Self {
            id,
            name: new.name,
            description: blank_to_none(new.description),
            unit: blank_to_none(new.unit).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            created_at: stamp.at,
        }
    }

    fn apply(&mut self, patch: ResourcePatch, _stamp: &Stamp) {
        assign(&mut self.name, patch.name);
        assign_nullable(&mut self.description, patch.description);
        assign(&mut self.unit, patch.unit);
    }
}
