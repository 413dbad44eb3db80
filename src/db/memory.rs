// src/db/memory.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::repository::{CrudRepository, Repository, UserRepository},
    models::{auth::AdminUser, Record, Stamp},
};

// In-process table used for tests and `STORAGE=memory` local runs.
pub struct MemoryTable<E> {
    rows: RwLock<Vec<E>>,
}

impl<E> Default for MemoryTable<E> {
    fn default() -> Self {
        Self { rows: RwLock::new(Vec::new()) }
    }
}

#[async_trait]
impl<E: Record> Repository<E> for MemoryTable<E> {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<E>, AppError> {
        let rows = self.rows.read().await;
        // Reverse insertion order first so equal timestamps still list newest first.
        let mut listed: Vec<E> = rows.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.recency().cmp(&a.recency()));
        if let Some(limit) = limit {
            listed.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        Ok(listed)
    }

    async fn insert(&self, row: E) -> Result<E, AppError> {
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &str, patch: E::Patch, stamp: &Stamp) -> Result<Option<E>, AppError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|row| row.id() == id) else {
            return Ok(None);
        };
        row.apply(patch, stamp);
        Ok(Some(row.clone()))
    }
}

#[async_trait]
impl<E: Record> CrudRepository<E> for MemoryTable<E> {
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.rows.write().await.retain(|row| row.id() != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<AdminUser>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AdminUser>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: AdminUser) -> Result<AdminUser, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::UsernameAlreadyExists);
        }
        users.push(user.clone());
        Ok(user)
    }
}
