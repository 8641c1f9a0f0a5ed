use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::models::{collections, Switch};

use super::collections::CollectionRepo;

/// Typed access to the "switches" collection
pub struct SwitchRepo;

impl SwitchRepo {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Switch>> {
        let records = CollectionRepo::get_all(pool, collections::SWITCHES).await?;
        let mut switches = records
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Switch>, _>>()?;
        switches.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(switches)
    }

    pub async fn get(pool: &Pool<Sqlite>, id: &str) -> Result<Option<Switch>> {
        let record = CollectionRepo::get(pool, collections::SWITCHES, id).await?;
        match record {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn put(pool: &Pool<Sqlite>, switch: &Switch) -> Result<()> {
        let record = serde_json::to_value(switch)?;
        CollectionRepo::put(pool, collections::SWITCHES, &switch.id, &record).await
    }

    pub async fn delete(pool: &Pool<Sqlite>, id: &str) -> Result<()> {
        CollectionRepo::delete(pool, collections::SWITCHES, id).await
    }
}
