// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{assign, assign_nullable, blank_to_none, double_option};
use crate::models::{Record, Stamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: String,
    #[schema(example = "ORD-001")]
    pub reference_id: String,
    #[schema(example = "Lockpicks")]
    pub items: String,
    pub quantity: i32,
    #[schema(example = "Alice")]
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub assigned_member_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewOrder {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Reference ID must be 1 to 255 characters"))]
    pub reference_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Items is required"))]
    pub items: String,
    #[serde(default)]
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Customer name must be 1 to 255 characters"))]
    pub customer_name: String,
    #[validate(length(max = 255, message = "Customer contact must be at most 255 characters"))]
    pub customer_contact: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    pub assigned_member_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OrderPatch {
    pub id: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Reference ID must be 1 to 255 characters"))]
    pub reference_id: Option<String>,
    #[validate(length(min = 1, message = "Items is required"))]
    pub items: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    #[validate(length(min = 1, max = 255, message = "Customer name must be 1 to 255 characters"))]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255, message = "Customer contact must be at most 255 characters"))]
    pub customer_contact: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub assigned_member_id: Option<Option<String>>,
}

impl Record for Order {
    type New = NewOrder;
    type Patch = OrderPatch;
    const ENTITY: &'static str = "Order";

    fn id(&self) -> &str {
        &self.id
    }

    fn recency(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn build(id: String, stamp: &Stamp, new: NewOrder) -> Self {
        Self {
            id,
            reference_id: new.reference_id,
            items: new.items,
            quantity: new.quantity,
            customer_name: new.customer_name,
            customer_contact: blank_to_none(new.customer_contact),
            notes: blank_to_none(new.notes),
            status: new.status,
            assigned_member_id: blank_to_none(new.assigned_member_id),
            created_at: stamp.at,
            updated_at: stamp.at,
        }
    }

    fn apply(&mut self, patch: OrderPatch, stamp: &Stamp) {
        assign(&mut self.reference_id, patch.reference_id);
        assign(&mut self.items, patch.items);
        assign(&mut self.quantity, patch.quantity);
        assign(&mut self.customer_name, patch.customer_name);
        assign_nullable(&mut self.customer_contact, patch.customer_contact);
        assign_nullable(&mut self.notes, patch.notes);
        assign(&mut self.status, patch.status);
        assign_nullable(&mut self.assigned_member_id, patch.assigned_member_id);
        self.updated_at = stamp.at;
    }
}
