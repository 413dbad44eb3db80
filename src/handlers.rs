pub mod auth;
pub mod crafted_items;
pub mod dashboard;
pub mod inventory;
pub mod members;
pub mod orders;
pub mod resources;
pub mod strikes;
pub mod task_completions;
pub mod tasks;
