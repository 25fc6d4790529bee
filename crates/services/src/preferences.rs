use std::sync::Arc;

use storage::repository::PreferencesRepository;
use trek_core::model::AccessibilityPrefs;

use crate::error::PreferencesServiceError;

/// Loads and saves the accessibility preferences record.
#[derive(Clone)]
pub struct PreferencesService {
    repo: Arc<dyn PreferencesRepository>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(repo: Arc<dyn PreferencesRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted preferences (or defaults if nothing was saved yet).
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn load(&self) -> Result<AccessibilityPrefs, PreferencesServiceError> {
        let prefs = self.repo.load_preferences().await?;
        Ok(prefs.unwrap_or_default())
    }

    /// Persist new preferences as a whole-record overwrite.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn save(&self, prefs: &AccessibilityPrefs) -> Result<(), PreferencesServiceError> {
        self.repo.save_preferences(prefs).await?;
        Ok(())
    }
}
