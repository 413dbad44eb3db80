pub mod auth;
pub mod crud_service;
pub mod dashboard_service;
pub mod inventory_service;
pub mod order_service;
pub mod strike_service;
pub mod task_history_service;
