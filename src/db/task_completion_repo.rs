// src/db/task_completion_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{CrudRepository, PgStore, Repository},
    models::{
        task_completion::{TaskCompletion, TaskCompletionPatch},
        Record, Stamp,
    },
};

#[async_trait]
impl Repository<TaskCompletion> for PgStore {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<TaskCompletion>, AppError> {
        let completions = sqlx::query_as::<_, TaskCompletion>(
            "SELECT * FROM task_completions ORDER BY noted_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(completions)
    }

    async fn insert(&self, completion: TaskCompletion) -> Result<TaskCompletion, AppError> {
        let created = sqlx::query_as::<_, TaskCompletion>(
            r#"
            INSERT INTO task_completions (
                id, task_id, member_id, date, amount_collected, completed, noted_by, noted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&completion.id)
        .bind(&completion.task_id)
        .bind(&completion.member_id)
        .bind(completion.date)
        .bind(completion.amount_collected)
        .bind(completion.completed)
        .bind(&completion.noted_by)
        .bind(completion.noted_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        patch: TaskCompletionPatch,
        stamp: &Stamp,
    ) -> Result<Option<TaskCompletion>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut completion) = sqlx::query_as::<_, TaskCompletion>(
            "SELECT * FROM task_completions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        completion.apply(patch, stamp);

        let updated = sqlx::query_as::<_, TaskCompletion>(
            r#"
            UPDATE task_completions SET
                member_id = $2, date = $3, amount_collected = $4, completed = $5,
                noted_by = $6, noted_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&completion.member_id)
        .bind(completion.date)
        .bind(completion.amount_collected)
        .bind(completion.completed)
        .bind(&completion.noted_by)
        .bind(completion.noted_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl CrudRepository<TaskCompletion> for PgStore {
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM task_completions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
