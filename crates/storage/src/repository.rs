use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use trek_core::model::{AccessibilityPrefs, ProgressDataError, ProgressRecord};

/// Storage key for the gamification progress blob.
pub const PROGRESS_KEY: &str = "gamification-progress";

/// Storage key for the accessibility preferences blob.
pub const PREFERENCES_KEY: &str = "accessibility-preferences";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of the progress record.
///
/// This mirrors the domain `ProgressRecord` so repositories can
/// serialize/deserialize without leaking storage concerns into the domain
/// layer. Field names match the blob the site has always written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub points: u64,
    pub level: u32,
    pub streak: u32,
    pub badges: Vec<String>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            points: record.points(),
            level: record.level(),
            streak: record.streak(),
            badges: record.badges().to_vec(),
        }
    }

    /// Convert the snapshot back into a domain `ProgressRecord`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressDataError` if the stored level disagrees with the
    /// stored points or a badge name is duplicated.
    pub fn into_record(self) -> Result<ProgressRecord, ProgressDataError> {
        ProgressRecord::from_persisted(self.points, self.level, self.streak, self.badges)
    }
}

/// Repository contract for the gamification progress blob.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the saved progress, `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn load_progress(&self) -> Result<Option<ProgressSnapshot>, StorageError>;

    /// Overwrite the whole progress record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError>;
}

/// Repository contract for accessibility preferences.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Fetch saved preferences, `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decode failures.
    async fn load_preferences(&self) -> Result<Option<AccessibilityPrefs>, StorageError>;

    /// Overwrite the whole preferences record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_preferences(&self, prefs: &AccessibilityPrefs) -> Result<(), StorageError>;
}

/// Simple in-memory key-value repository for testing and prototyping.
///
/// Values are stored as JSON strings under the same fixed keys the SQLite
/// backend uses, so both backends see identical blobs.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value);
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        let Some(raw) = self.get(PROGRESS_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn save_progress(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.put(PROGRESS_KEY, raw)
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryRepository {
    async fn load_preferences(&self) -> Result<Option<AccessibilityPrefs>, StorageError> {
        let Some(raw) = self.get(PREFERENCES_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn save_preferences(&self, prefs: &AccessibilityPrefs) -> Result<(), StorageError> {
        let raw = serde_json::to_string(prefs)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.put(PREFERENCES_KEY, raw)
    }
}

/// Aggregates the two repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub preferences: Arc<dyn PreferencesRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferencesRepository> = Arc::new(repo);
        Self {
            progress,
            preferences,
        }
    }
}
