use anyhow::Result;
use sqlx::{Pool, Sqlite};

/// Generic document-collection operations.
///
/// Every record lives in one `documents` table keyed by (collection, id)
/// with the record body as a JSON blob. This is the whole storage boundary
/// of the topology engine: get-all, upsert by id, delete by id.
pub struct CollectionRepo;

impl CollectionRepo {
    pub async fn get_all(pool: &Pool<Sqlite>, collection: &str) -> Result<Vec<serde_json::Value>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT data FROM documents WHERE collection = ?")
                .bind(collection)
                .fetch_all(pool)
                .await?;

        rows.iter()
            .map(|(data,)| Ok(serde_json::from_str(data)?))
            .collect()
    }

    pub async fn get(
        pool: &Pool<Sqlite>,
        collection: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT data FROM documents WHERE collection = ? AND id = ?")
                .bind(collection)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    /// Upsert a record by its id
    pub async fn put(
        pool: &Pool<Sqlite>,
        collection: &str,
        id: &str,
        record: &serde_json::Value,
    ) -> Result<()> {
        let data = serde_json::to_string(record)?;
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data) VALUES (?, ?, ?)
            ON CONFLICT(collection, id) DO UPDATE SET data = excluded.data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(&data)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn delete(pool: &Pool<Sqlite>, collection: &str, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
