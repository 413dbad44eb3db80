// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::assign;
use crate::models::{Record, Stamp};

// One stock reading for a resource. Several rows may exist per resource;
// the one with the latest `updated_at` is the current level.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Inventory {
    pub id: String,
    pub resource_id: String,
    #[schema(example = 25)]
    pub quantity: i32,
    pub updated_by: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewInventory {
    #[serde(default)]
    #[validate(length(min = 1, message = "resource_id is required"))]
    pub resource_id: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InventoryPatch {
    pub id: Option<String>,
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: Option<i32>,
}

impl Record for Inventory {
    type New = NewInventory;
    type Patch = InventoryPatch;
    const ENTITY: &'static str = "Inventory";

    fn id(&self) -> &str {
        &self.id
    }

    fn recency(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn build(id: String, stamp: &Stamp, new: NewInventory) -> Self {
        Self {
            id,
            resource_id: new.resource_id,
            quantity: new.quantity,
            updated_by: stamp.by.clone(),
            updated_at: stamp.at,
        }
    }

    fn apply(&mut self, patch: InventoryPatch, stamp: &Stamp) {
        assign(&mut self.quantity, patch.quantity);
        self.updated_by = stamp.by.clone();
        self.updated_at = stamp.at;
    }
}
