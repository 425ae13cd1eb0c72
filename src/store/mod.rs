use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::AppError;

/// Snapshot key for the course catalog.
pub const COURSES_KEY: &str = "courses";
/// Snapshot key for the member registry.
pub const MEMBERS_KEY: &str = "members";

/// Whole-list persistence under fixed string keys. Every write overwrites
/// the previous document; there is no expiry and no versioning.
#[derive(Clone)]
pub struct SnapshotStore {
    db: SqlitePool,
}

impl SnapshotStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Returns `None` when the key is absent or the stored text no longer
    /// parses. A corrupt document is logged and treated as no data.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, AppError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM snapshots WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some((text,)) => match serde_json::from_str(&text) {
                Ok(list) => Ok(Some(list)),
                Err(err) => {
                    warn!("discarding corrupt snapshot under '{}': {}", key, err);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub async fn write<T: Serialize>(&self, key: &str, list: &[T]) -> Result<(), AppError> {
        let text = serde_json::to_string(list)?;
        sqlx::query("INSERT INTO snapshots (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value")
            .bind(key)
            .bind(text)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
