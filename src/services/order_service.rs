// src/services/order_service.rs

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::order::{Order, OrderStatus};

/// Which slice of the order board to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderView {
    #[default]
    All,
    /// Everything not yet completed.
    Active,
    /// Completed orders only.
    History,
}

impl OrderView {
    pub fn includes(self, status: OrderStatus) -> bool {
        match self {
            OrderView::All => true,
            OrderView::Active => status != OrderStatus::Completed,
            OrderView::History => status == OrderStatus::Completed,
        }
    }
}

pub fn filter_orders(orders: Vec<Order>, view: OrderView) -> Vec<Order> {
    orders.into_iter().filter(|order| view.includes(order.status)).collect()
}
