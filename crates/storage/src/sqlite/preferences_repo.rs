use async_trait::async_trait;

use super::SqliteRepository;
use crate::repository::{PREFERENCES_KEY, PreferencesRepository, StorageError};
use trek_core::model::AccessibilityPrefs;

#[async_trait]
impl PreferencesRepository for SqliteRepository {
    async fn load_preferences(&self) -> Result<Option<AccessibilityPrefs>, StorageError> {
        let Some(raw) = self.get_value(PREFERENCES_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_preferences(&self, prefs: &AccessibilityPrefs) -> Result<(), StorageError> {
        let raw = serde_json::to_string(prefs)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.put_value(PREFERENCES_KEY, &raw).await
    }
}
