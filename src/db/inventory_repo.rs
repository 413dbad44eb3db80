// src/db/inventory_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{PgStore, Repository},
    models::{
        inventory::{Inventory, InventoryPatch},
        Record, Stamp,
    },
};

// Inventory rows are never deleted, so there is no `CrudRepository` impl here.
// `seq` is bumped on every write and orders rows that share an `updated_at`.
#[async_trait]
impl Repository<Inventory> for PgStore {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Inventory>, AppError> {
        let rows = sqlx::query_as::<_, Inventory>(
            "SELECT * FROM inventory ORDER BY updated_at DESC, seq DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, row: Inventory) -> Result<Inventory, AppError> {
        let created = sqlx::query_as::<_, Inventory>(
            r#"
            INSERT INTO inventory (id, resource_id, quantity, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&row.id)
        .bind(&row.resource_id)
        .bind(row.quantity)
        .bind(&row.updated_by)
        .bind(row.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: &str, patch: InventoryPatch, stamp: &Stamp) -> Result<Option<Inventory>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut row) =
            sqlx::query_as::<_, Inventory>("SELECT * FROM inventory WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        row.apply(patch, stamp);

        let updated = sqlx::query_as::<_, Inventory>(
            r#"
            UPDATE inventory
            SET quantity = $2, updated_by = $3, updated_at = $4,
                seq = nextval(pg_get_serial_sequence('inventory', 'seq'))
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(row.quantity)
        .bind(&row.updated_by)
        .bind(row.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}
