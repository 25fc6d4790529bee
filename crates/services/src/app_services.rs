use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::games::GameLoader;
use crate::gamification::GamificationService;
use crate::notify::AnnouncementSink;
use crate::preferences::PreferencesService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    gamification: Arc<GamificationService>,
    preferences: Arc<PreferencesService>,
    loader: GameLoader,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        sink: Arc<dyn AnnouncementSink>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, sink).await)
    }

    /// Build services over an already constructed storage backend.
    pub async fn from_storage(storage: &Storage, sink: Arc<dyn AnnouncementSink>) -> Self {
        let gamification = Arc::new(
            GamificationService::load(Arc::clone(&storage.progress), Arc::clone(&sink)).await,
        );
        let preferences = Arc::new(PreferencesService::new(Arc::clone(&storage.preferences)));
        let loader = GameLoader::new(Arc::clone(&gamification), sink);

        Self {
            gamification,
            preferences,
            loader,
        }
    }

    #[must_use]
    pub fn gamification(&self) -> Arc<GamificationService> {
        Arc::clone(&self.gamification)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }

    #[must_use]
    pub fn loader(&self) -> &GameLoader {
        &self.loader
    }
}
