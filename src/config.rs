// src/config.rs

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{CrudRepository, MemoryTable, MemoryUserRepository, PgStore, Repository},
    models::{
        crafted_item::CraftedItem, inventory::Inventory, member::Member, order::Order,
        resource::Resource, strike::Strike, task::Task, task_completion::TaskCompletion,
    },
    services::auth::AuthService,
};

/// Ten years.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bind_addr: String,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let storage = match get("STORAGE").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => bail!("STORAGE must be 'postgres' or 'memory', got '{other}'"),
        };

        let database_url = get("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set");
        }

        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET must be set")?;

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(value) => value.parse().context("DB_MAX_CONNECTIONS must be a number")?,
            None => 5,
        };

        let token_ttl_hours: i64 = match get("TOKEN_TTL_HOURS") {
            Some(value) => value.parse().context("TOKEN_TTL_HOURS must be a number")?,
            None => 24 * 7,
        };
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            bail!("TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {token_ttl_hours}");
        }

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| {
            format!("0.0.0.0:{}", get("PORT").unwrap_or_else(|| "3000".to_string()))
        });

        Ok(Self {
            storage,
            database_url,
            db_max_connections,
            jwt_secret,
            token_ttl_hours,
            bind_addr,
            admin_username: get("ADMIN_USERNAME"),
            admin_password: get("ADMIN_PASSWORD"),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        })
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }
}

// Shared state handed to every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<dyn CrudRepository<Member>>,
    pub resources: Arc<dyn CrudRepository<Resource>>,
    pub inventory: Arc<dyn Repository<Inventory>>,
    pub tasks: Arc<dyn CrudRepository<Task>>,
    pub task_completions: Arc<dyn CrudRepository<TaskCompletion>>,
    pub strikes: Arc<dyn CrudRepository<Strike>>,
    pub crafted_items: Arc<dyn CrudRepository<CraftedItem>>,
    pub orders: Arc<dyn CrudRepository<Order>>,
    pub auth_service: AuthService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let app_state = match (config.storage, config.database_url.as_deref()) {
            (StorageBackend::Postgres, Some(database_url)) => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("Database connection established");

                sqlx::migrate!().run(&db_pool).await?;
                tracing::info!("Database migrations applied");

                Self::with_postgres(db_pool, config)
            }
            (StorageBackend::Postgres, None) => bail!("DATABASE_URL must be set"),
            (StorageBackend::Memory, _) => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                Self::in_memory(AuthService::new(
                    Arc::new(MemoryUserRepository::default()),
                    config.jwt_secret.clone(),
                    config.token_ttl(),
                ))
            }
        };

        if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
            if app_state.auth_service.seed_admin(username, password).await? {
                tracing::info!(%username, "Seeded admin user");
            }
        }

        Ok(app_state)
    }

    pub fn with_postgres(db_pool: PgPool, config: &Config) -> Self {
        let store = PgStore::new(db_pool);
        let auth_service = AuthService::new(
            Arc::new(store.clone()),
            config.jwt_secret.clone(),
            config.token_ttl(),
        );

        Self {
            members: Arc::new(store.clone()),
            resources: Arc::new(store.clone()),
            inventory: Arc::new(store.clone()),
            tasks: Arc::new(store.clone()),
            task_completions: Arc::new(store.clone()),
            strikes: Arc::new(store.clone()),
            crafted_items: Arc::new(store.clone()),
            orders: Arc::new(store),
            auth_service,
        }
    }

    pub fn in_memory(auth_service: AuthService) -> Self {
        Self {
            members: Arc::new(MemoryTable::<Member>::default()),
            resources: Arc::new(MemoryTable::<Resource>::default()),
            inventory: Arc::new(MemoryTable::<Inventory>::default()),
            tasks: Arc::new(MemoryTable::<Task>::default()),
            task_completions: Arc::new(MemoryTable::<TaskCompletion>::default()),
            strikes: Arc::new(MemoryTable::<Strike>::default()),
            crafted_items: Arc::new(MemoryTable::<CraftedItem>::default()),
            orders: Arc::new(MemoryTable::<Order>::default()),
            auth_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn postgres_requires_a_database_url() {
        let err = Config::from_lookup(lookup(&[("JWT_SECRET", "s")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn memory_backend_needs_only_a_secret() {
        let config = Config::from_lookup(lookup(&[("STORAGE", "memory"), ("JWT_SECRET", "s")])).unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.token_ttl_hours, 168);
    }

    #[test]
    fn port_is_used_when_no_bind_addr_is_given() {
        let config = Config::from_lookup(lookup(&[
            ("STORAGE", "memory"),
            ("JWT_SECRET", "s"),
            ("PORT", "5000"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:5000");
    }

    #[test]
    fn token_ttl_outside_the_allowed_range_is_rejected() {
        for ttl in ["0", "-5", "87601", "10000000000"] {
            let result = Config::from_lookup(lookup(&[
                ("STORAGE", "memory"),
                ("JWT_SECRET", "s"),
                ("TOKEN_TTL_HOURS", ttl),
            ]));
            assert!(result.is_err(), "TOKEN_TTL_HOURS={ttl} was accepted");
        }

        let config = Config::from_lookup(lookup(&[
            ("STORAGE", "memory"),
            ("JWT_SECRET", "s"),
            ("TOKEN_TTL_HOURS", "87600"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl(), chrono::Duration::hours(87600));
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert!(Config::from_lookup(lookup(&[("STORAGE", "memory")])).is_err());
    }
}
