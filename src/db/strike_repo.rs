// src/db/strike_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{CrudRepository, PgStore, Repository},
    models::{
        strike::{Strike, StrikePatch},
        Record, Stamp,
    },
};

#[async_trait]
impl Repository<Strike> for PgStore {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Strike>, AppError> {
        let strikes = sqlx::query_as::<_, Strike>(
            "SELECT * FROM strikes ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(strikes)
    }

    async fn insert(&self, strike: Strike) -> Result<Strike, AppError> {
        let created = sqlx::query_as::<_, Strike>(
            r#"
            INSERT INTO strikes (id, member_id, issued_by, reason, points, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&strike.id)
        .bind(&strike.member_id)
        .bind(&strike.issued_by)
        .bind(&strike.reason)
        .bind(strike.points)
        .bind(strike.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: &str, patch: StrikePatch, stamp: &Stamp) -> Result<Option<Strike>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut strike) =
            sqlx::query_as::<_, Strike>("SELECT * FROM strikes WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        strike.apply(patch, stamp);

        let updated = sqlx::query_as::<_, Strike>(
            "UPDATE strikes SET member_id = $2, reason = $3, points = $4 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&strike.member_id)
        .bind(&strike.reason)
        .bind(strike.points)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl CrudRepository<Strike> for PgStore {
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM strikes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
