// src/models/crafted_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{assign, assign_nullable, blank_to_none, double_option};
use crate::models::{Record, Stamp};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CraftedItem {
    pub id: String,
    #[schema(example = "Lockpick")]
    pub item_name: String,
    pub quantity: i32,
    /// Member id of the crafter.
    pub crafted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewCraftedItem {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Item name must be 1 to 255 characters"))]
    pub item_name: String,
    #[serde(default)]
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    pub crafted_by: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CraftedItemPatch {
    pub id: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Item name must be 1 to 255 characters"))]
    pub item_name: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub crafted_by: Option<Option<String>>,
}

impl Record for CraftedItem {
    type New = NewCraftedItem;
    type Patch = CraftedItemPatch;
    const ENTITY: &'static str = "Item";

    fn id(&self) -> &str {
        &self.id
    }

    fn recency(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn build(id: String, stamp: &Stamp, new: NewCraftedItem) -> Self {
        Self {
            id,
            item_name: new.item_name,
            quantity: new.quantity,
            crafted_by: blank_to_none(new.crafted_by),
            created_at: stamp.at,
            updated_at: stamp.at,
        }
    }

    fn apply(&mut self, patch: CraftedItemPatch, stamp: &Stamp) {
        assign(&mut self.item_name, patch.item_name);
        assign(&mut self.quantity, patch.quantity);
        assign_nullable(&mut self.crafted_by, patch.crafted_by);
        self.updated_at = stamp.at;
    }
}
