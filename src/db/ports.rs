use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::models::{collections, Port};

use super::collections::CollectionRepo;

/// Typed access to the "switch_ports" collection
pub struct PortRepo;

impl PortRepo {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Port>> {
        let records = CollectionRepo::get_all(pool, collections::SWITCH_PORTS).await?;
        records
            .into_iter()
            .map(|value| Ok(serde_json::from_value(value)?))
            .collect()
    }

    /// Ports of one switch, ordered by port number ascending
    pub async fn list_for_switch(pool: &Pool<Sqlite>, switch_id: &str) -> Result<Vec<Port>> {
        let mut ports: Vec<Port> = Self::list(pool)
            .await?
            .into_iter()
            .filter(|p| p.switch_id == switch_id)
            .collect();
        ports.sort_by_key(|p| p.port_number);
        Ok(ports)
    }

    pub async fn get(pool: &Pool<Sqlite>, id: &str) -> Result<Option<Port>> {
        let record = CollectionRepo::get(pool, collections::SWITCH_PORTS, id).await?;
        match record {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn put(pool: &Pool<Sqlite>, port: &Port) -> Result<()> {
        let record = serde_json::to_value(port)?;
        CollectionRepo::put(pool, collections::SWITCH_PORTS, &port.id, &record).await
    }

    pub async fn delete(pool: &Pool<Sqlite>, id: &str) -> Result<()> {
        CollectionRepo::delete(pool, collections::SWITCH_PORTS, id).await
    }
}
