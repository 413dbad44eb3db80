// src/db/repository.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::{auth::AdminUser, Record, Stamp},
};

/// Read, insert and partial-update access to one table.
#[async_trait]
pub trait Repository<E: Record>: Send + Sync {
    /// Rows ordered newest first, optionally capped to `limit`.
    async fn list(&self, limit: Option<i64>) -> Result<Vec<E>, AppError>;

    /// Stores a row built by `Record::build` and returns it as persisted.
    async fn insert(&self, row: E) -> Result<E, AppError>;

    /// `Ok(None)` when no row has this id.
    async fn update(&self, id: &str, patch: E::Patch, stamp: &Stamp) -> Result<Option<E>, AppError>;
}

/// Tables that also allow removal.
#[async_trait]
pub trait CrudRepository<E: Record>: Repository<E> {
    /// Idempotent: deleting a missing id succeeds.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<AdminUser>, AppError>;

    /// Fails with `UsernameAlreadyExists` on a duplicate username.
    async fn create_user(&self, user: AdminUser) -> Result<AdminUser, AppError>;
}
