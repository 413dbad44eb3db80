// src/db/resource_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{CrudRepository, PgStore, Repository},
    models::{
        resource::{Resource, ResourcePatch},
        Record, Stamp,
    },
};

#[async_trait]
impl Repository<Resource> for PgStore {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Resource>, AppError> {
        let resources = sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(resources)
    }

    async fn insert(&self, resource: Resource) -> Result<Resource, AppError> {
        let created = sqlx::query_as::<_, Resource>(
            r#"
            INSERT INTO resources (id, name, description, unit, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&resource.id)
        .bind(&resource.name)
        .bind(&resource.description)
        .bind(&resource.unit)
        .bind(resource.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: &str, patch: ResourcePatch, stamp: &Stamp) -> Result<Option<Resource>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut resource) =
            sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        resource.apply(patch, stamp);

        let updated = sqlx::query_as::<_, Resource>(
            "UPDATE resources SET name = $2, description = $3, unit = $4 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&resource.name)
        .bind(&resource.description)
        .bind(&resource.unit)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl CrudRepository<Resource> for PgStore {
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
