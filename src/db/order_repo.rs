// src/db/order_repo.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    db::{CrudRepository, PgStore, Repository},
    models::{
        order::{Order, OrderPatch},
        Record, Stamp,
    },
};

#[async_trait]
impl Repository<Order> for PgStore {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    async fn insert(&self, order: Order) -> Result<Order, AppError> {
        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                id, reference_id, items, quantity, customer_name, customer_contact,
                notes, status, assigned_member_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&order.id)
        .bind(&order.reference_id)
        .bind(&order.items)
        .bind(order.quantity)
        .bind(&order.customer_name)
        .bind(&order.customer_contact)
        .bind(&order.notes)
        .bind(order.status)
        .bind(&order.assigned_member_id)
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: &str, patch: OrderPatch, stamp: &Stamp) -> Result<Option<Order>, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(mut order) =
            sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        order.apply(patch, stamp);

        let updated = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET
                reference_id = $2, items = $3, quantity = $4, customer_name = $5,
                customer_contact = $6, notes = $7, status = $8, assigned_member_id = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&order.reference_id)
        .bind(&order.items)
        .bind(order.quantity)
        .bind(&order.customer_name)
        .bind(&order.customer_contact)
        .bind(&order.notes)
        .bind(order.status)
        .bind(&order.assigned_member_id)
        .bind(order.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}

#[async_trait]
impl CrudRepository<Order> for PgStore {
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
