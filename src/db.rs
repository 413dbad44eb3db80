pub mod repository;
pub use repository::{CrudRepository, Repository, UserRepository};
pub mod memory;
pub use memory::{MemoryTable, MemoryUserRepository};
pub mod pg_store;
pub use pg_store::PgStore;

mod crafted_item_repo;
mod inventory_repo;
mod member_repo;
mod order_repo;
mod resource_repo;
mod strike_repo;
mod task_completion_repo;
mod task_repo;
mod user_repo;
