// src/db/crafted_item_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{CrudRepository, PgStore, Repository},
    models::{
        crafted_item::{CraftedItem, CraftedItemPatch},
        Record, Stamp,
    },
};

#[async_trait]
impl Repository<CraftedItem> for PgStore {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<CraftedItem>, AppError> {
        let items = sqlx::query_as::<_, CraftedItem>(
            "SELECT * FROM crafted_items ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn insert(&self, item: CraftedItem) -> Result<CraftedItem, AppError> {
        let created = sqlx::query_as::<_, CraftedItem>(
            r#"
            INSERT INTO crafted_items (id, item_name, quantity, crafted_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&item.id)
        .bind(&item.item_name)
        .bind(item.quantity)
        .bind(&item.crafted_by)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        patch: CraftedItemPatch,
        stamp: &Stamp,
    ) -> Result<Option<CraftedItem>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut item) =
            sqlx::query_as::<_, CraftedItem>("SELECT * FROM crafted_items WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        item.apply(patch, stamp);

        let updated = sqlx::query_as::<_, CraftedItem>(
            r#"
            UPDATE crafted_items SET item_name = $2, quantity = $3, crafted_by = $4, updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&item.item_name)
        .bind(item.quantity)
        .bind(&item.crafted_by)
        .bind(item.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl CrudRepository<CraftedItem> for PgStore {
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM crafted_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
