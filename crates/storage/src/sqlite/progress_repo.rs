use async_trait::async_trait;

use super::SqliteRepository;
use crate::repository::{PROGRESS_KEY, ProgressRepository, ProgressSnapshot, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_progress(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        let Some(raw) = self.get_value(PROGRESS_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.put_value(PROGRESS_KEY, &raw).await
    }
}
