mod collections;
mod ports;
mod switches;

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

use crate::models::*;

/// Typed error for "resource not found" — enables reliable downcast
/// in the API error handler instead of fragile string matching.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Typed error for a rejected input (empty required field and the like).
/// No write has happened when this is returned.
#[derive(Debug)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Typed error for a refused delete: the switch still has child switches
/// hanging off its uplink ports. No write has happened when this is returned.
#[derive(Debug)]
pub struct DeleteBlockedError {
    pub switch_name: String,
    pub child_count: usize,
}

impl std::fmt::Display for DeleteBlockedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot delete switch '{}': {} connected child switch(es) must be deleted first",
            self.switch_name, self.child_count
        )
    }
}

impl std::error::Error for DeleteBlockedError {}

/// Store handles all database operations, delegating to per-collection
/// repo modules over a single generic document table.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Create a new database store with the default pool size
    pub async fn new(db_path: &str) -> Result<Self> {
        Self::with_pool_size(db_path, 5).await
    }

    /// Create a new database store with a specific pool size
    pub async fn with_pool_size(db_path: &str, max_connections: u32) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// In-memory store for tests. Pool size is pinned to one connection
    /// since each SQLite :memory: connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ========== Generic Collection Operations ==========

    pub async fn get_all(&self, collection: &str) -> Result<Vec<serde_json::Value>> {
        collections::CollectionRepo::get_all(&self.pool, collection).await
    }

    pub async fn put(&self, collection: &str, id: &str, record: &serde_json::Value) -> Result<()> {
        collections::CollectionRepo::put(&self.pool, collection, id, record).await
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        collections::CollectionRepo::delete(&self.pool, collection, id).await
    }

    // ========== Switch Operations ==========

    pub async fn list_switches(&self) -> Result<Vec<Switch>> {
        switches::SwitchRepo::list(&self.pool).await
    }

    pub async fn get_switch(&self, id: &str) -> Result<Option<Switch>> {
        switches::SwitchRepo::get(&self.pool, id).await
    }

    pub async fn put_switch(&self, switch: &Switch) -> Result<()> {
        switches::SwitchRepo::put(&self.pool, switch).await
    }

    pub async fn delete_switch(&self, id: &str) -> Result<()> {
        switches::SwitchRepo::delete(&self.pool, id).await
    }

    // ========== Port Operations ==========

    pub async fn list_ports(&self) -> Result<Vec<Port>> {
        ports::PortRepo::list(&self.pool).await
    }

    pub async fn list_ports_for_switch(&self, switch_id: &str) -> Result<Vec<Port>> {
        ports::PortRepo::list_for_switch(&self.pool, switch_id).await
    }

    pub async fn get_port(&self, id: &str) -> Result<Option<Port>> {
        ports::PortRepo::get(&self.pool, id).await
    }

    pub async fn put_port(&self, port: &Port) -> Result<()> {
        ports::PortRepo::put(&self.pool, port).await
    }

    pub async fn delete_port(&self, id: &str) -> Result<()> {
        ports::PortRepo::delete(&self.pool, id).await
    }
}
