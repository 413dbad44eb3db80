// src/db/pg_store.rs

use sqlx::PgPool;

// Postgres adapter. The per-table `Repository` impls live in the `*_repo.rs` files.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
