// src/db/member_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{CrudRepository, PgStore, Repository},
    models::{
        member::{Member, MemberPatch},
        Record, Stamp,
    },
};

#[async_trait]
impl Repository<Member> for PgStore {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Member>, AppError> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT * FROM members ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn insert(&self, member: Member) -> Result<Member, AppError> {
        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id, name, tag, notes, added_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.tag)
        .bind(&member.notes)
        .bind(&member.added_by)
        .bind(member.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: &str, patch: MemberPatch, stamp: &Stamp) -> Result<Option<Member>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut member) =
            sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        member.apply(patch, stamp);

        let updated = sqlx::query_as::<_, Member>(
            "UPDATE members SET name = $2, tag = $3, notes = $4 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&member.name)
        .bind(&member.tag)
        .bind(&member.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl CrudRepository<Member> for PgStore {
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
