// src/db/task_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{CrudRepository, PgStore, Repository},
    models::{
        task::{Task, TaskPatch},
        Record, Stamp,
    },
};

#[async_trait]
impl Repository<Task> for PgStore {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn insert(&self, task: Task) -> Result<Task, AppError> {
        let created = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (
                id, title, description, resource_id, required_amount,
                assigned_member_id, recurrence, created_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.resource_id)
        .bind(task.required_amount)
        .bind(&task.assigned_member_id)
        .bind(task.recurrence)
        .bind(&task.created_by)
        .bind(task.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: &str, patch: TaskPatch, stamp: &Stamp) -> Result<Option<Task>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut task) =
            sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        task.apply(patch, stamp);

        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                title = $2, description = $3, resource_id = $4, required_amount = $5,
                assigned_member_id = $6, recurrence = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.resource_id)
        .bind(task.required_amount)
        .bind(&task.assigned_member_id)
        .bind(task.recurrence)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl CrudRepository<Task> for PgStore {
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
