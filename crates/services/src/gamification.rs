use std::sync::{Arc, Mutex, PoisonError};

use storage::repository::{ProgressRepository, ProgressSnapshot};
use trek_core::model::{BadgeCategory, ProgressRecord, achievement_badge};

use crate::notify::{AnnouncementSink, Notification};

/// Owns the learner's points/level/streak/badge state.
///
/// Every mutation persists the whole record and announces what happened
/// through the injected sink. Persistence failures are recoverable: the
/// in-memory state keeps advancing and the failure is surfaced as a warning,
/// never a crash, since gamification state is non-critical.
pub struct GamificationService {
    repo: Arc<dyn ProgressRepository>,
    sink: Arc<dyn AnnouncementSink>,
    record: Mutex<ProgressRecord>,
}

impl GamificationService {
    /// Load the saved record, falling back to the zeroed default when nothing
    /// was saved yet or the saved blob is unreadable.
    pub async fn load(repo: Arc<dyn ProgressRepository>, sink: Arc<dyn AnnouncementSink>) -> Self {
        let record = match repo.load_progress().await {
            Ok(Some(snapshot)) => match snapshot.into_record() {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(%err, "ignoring invalid saved progress");
                    ProgressRecord::new()
                }
            },
            Ok(None) => ProgressRecord::new(),
            Err(err) => {
                tracing::warn!(%err, "could not load saved progress");
                ProgressRecord::new()
            }
        };

        Self {
            repo,
            sink,
            record: Mutex::new(record),
        }
    }

    /// Current state, cloned for display.
    #[must_use]
    pub fn progress(&self) -> ProgressRecord {
        self.lock().clone()
    }

    /// Add points under a category, re-checking the level boundary.
    pub async fn add_points(&self, amount: u32, category: &str) {
        let (snapshot, notes) = {
            let mut record = self.lock();
            let mut notes = Vec::new();

            if let Some(level) = record.add_points(amount) {
                notes.push(Notification::LevelUp { level });
                let name = format!("Level {level} Scholar");
                if record.insert_badge(&name) {
                    notes.push(Notification::BadgeEarned { name });
                }
            }
            notes.push(Notification::PointsAwarded {
                amount,
                category: category.to_owned(),
                total: record.points(),
            });

            (ProgressSnapshot::from_record(&record), notes)
        };

        self.persist(snapshot).await;
        self.announce_all(&notes);
    }

    /// Extend the streak on a completed activity, or reset it on a miss.
    /// Every fifth consecutive completion earns a streak badge.
    pub async fn update_streak(&self, completed: bool) {
        let (snapshot, notes) = {
            let mut record = self.lock();
            let mut notes = Vec::new();

            if completed {
                let streak = record.extend_streak();
                notes.push(Notification::StreakUpdated { streak });
                if streak % 5 == 0 {
                    let name = format!("{streak} Day Streak!");
                    if record.insert_badge(&name) {
                        notes.push(Notification::BadgeEarned { name });
                    }
                }
            } else {
                record.reset_streak();
                notes.push(Notification::StreakUpdated { streak: 0 });
            }

            (ProgressSnapshot::from_record(&record), notes)
        };

        self.persist(snapshot).await;
        self.announce_all(&notes);
    }

    /// Award a badge by name. Awarding an already-held badge is a no-op.
    pub async fn award_badge(&self, category: BadgeCategory, name: &str) {
        let snapshot = {
            let mut record = self.lock();
            if !record.insert_badge(name) {
                return;
            }
            ProgressSnapshot::from_record(&record)
        };

        tracing::debug!(category = category.display_name(), name, "badge awarded");
        self.persist(snapshot).await;
        self.sink.announce(&Notification::BadgeEarned {
            name: name.to_owned(),
        });
    }

    /// Look up the fixed subject/action table and award the mapped badge.
    /// Unknown pairs are silently ignored.
    pub async fn track_achievement(&self, subject: &str, action: &str) {
        if let Some(name) = achievement_badge(subject, action) {
            self.award_badge(BadgeCategory::Achievement, name).await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProgressRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn persist(&self, snapshot: ProgressSnapshot) {
        if let Err(err) = self.repo.save_progress(&snapshot).await {
            tracing::warn!(%err, "progress save failed");
            self.sink.announce(&Notification::SaveFailed);
        }
    }

    fn announce_all(&self, notes: &[Notification]) {
        for note in notes {
            self.sink.announce(note);
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use storage::repository::{InMemoryRepository, StorageError};
    use trek_core::model::level_for_points;

    async fn engine_with(
        repo: InMemoryRepository,
    ) -> (Arc<GamificationService>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let engine = GamificationService::load(Arc::new(repo), Arc::clone(&sink) as _).await;
        (Arc::new(engine), sink)
    }

    #[tokio::test]
    async fn level_invariant_holds_after_every_addition() {
        let (engine, _sink) = engine_with(InMemoryRepository::new()).await;
        for amount in [250, 750, 1, 999, 2000] {
            engine.add_points(amount, "quiz").await;
            let record = engine.progress();
            assert_eq!(record.level(), level_for_points(record.points()));
        }
    }

    #[tokio::test]
    async fn crossing_a_thousand_points_levels_up_and_awards_badge() {
        let (engine, sink) = engine_with(InMemoryRepository::new()).await;
        engine.add_points(999, "quiz").await;
        assert_eq!(engine.progress().level(), 1);

        engine.add_points(1, "quiz").await;
        let record = engine.progress();
        assert_eq!(record.level(), 2);
        assert!(record.has_badge("Level 2 Scholar"));

        let notes = sink.notifications();
        assert!(notes.contains(&Notification::LevelUp { level: 2 }));
        assert!(notes.contains(&Notification::BadgeEarned {
            name: "Level 2 Scholar".to_owned()
        }));
    }

    #[tokio::test]
    async fn level_up_is_announced_before_the_point_award() {
        let (engine, sink) = engine_with(InMemoryRepository::new()).await;
        engine.add_points(1000, "timeline").await;

        let notes = sink.notifications();
        let level_at = notes
            .iter()
            .position(|n| matches!(n, Notification::LevelUp { .. }))
            .unwrap();
        let points_at = notes
            .iter()
            .position(|n| matches!(n, Notification::PointsAwarded { .. }))
            .unwrap();
        assert!(level_at < points_at);
    }

    #[tokio::test]
    async fn badge_award_is_idempotent() {
        let (engine, sink) = engine_with(InMemoryRepository::new()).await;
        engine
            .award_badge(BadgeCategory::Achievement, "Map Master")
            .await;
        engine
            .award_badge(BadgeCategory::Achievement, "Map Master")
            .await;

        let record = engine.progress();
        assert_eq!(
            record
                .badges()
                .iter()
                .filter(|name| name.as_str() == "Map Master")
                .count(),
            1
        );
        let earned = sink
            .notifications()
            .iter()
            .filter(|n| matches!(n, Notification::BadgeEarned { .. }))
            .count();
        assert_eq!(earned, 1);
    }

    #[tokio::test]
    async fn streak_badge_fires_on_positive_multiples_of_five() {
        let (engine, _sink) = engine_with(InMemoryRepository::new()).await;
        for _ in 0..4 {
            engine.update_streak(true).await;
        }
        assert!(!engine.progress().has_badge("5 Day Streak!"));

        engine.update_streak(true).await;
        assert!(engine.progress().has_badge("5 Day Streak!"));

        for _ in 0..5 {
            engine.update_streak(true).await;
        }
        let record = engine.progress();
        assert_eq!(record.streak(), 10);
        assert!(record.has_badge("10 Day Streak!"));
    }

    #[tokio::test]
    async fn missed_activity_resets_streak_but_keeps_badges() {
        let (engine, _sink) = engine_with(InMemoryRepository::new()).await;
        for _ in 0..5 {
            engine.update_streak(true).await;
        }
        engine.update_streak(false).await;

        let record = engine.progress();
        assert_eq!(record.streak(), 0);
        assert!(record.has_badge("5 Day Streak!"));
    }

    #[tokio::test]
    async fn unknown_achievements_are_silently_ignored() {
        let (engine, sink) = engine_with(InMemoryRepository::new()).await;
        engine.track_achievement("history", "mapsCompleted").await;
        engine.track_achievement("astronomy", "starsCounted").await;
        assert!(engine.progress().badges().is_empty());
        assert!(sink.notifications().is_empty());

        engine.track_achievement("geography", "mapsCompleted").await;
        assert!(engine.progress().has_badge("Map Master"));
    }

    #[tokio::test]
    async fn state_survives_reload_through_storage() {
        let repo = InMemoryRepository::new();
        let (engine, _sink) = engine_with(repo.clone()).await;
        engine.add_points(1200, "matching").await;
        engine.update_streak(true).await;
        engine
            .award_badge(BadgeCategory::Achievement, "Globe Trotter")
            .await;
        let before = engine.progress();

        let (reloaded, _sink) = engine_with(repo).await;
        assert_eq!(reloaded.progress(), before);
    }

    struct FailingRepository;

    #[async_trait::async_trait]
    impl ProgressRepository for FailingRepository {
        async fn load_progress(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
            Err(StorageError::Connection("backend offline".to_owned()))
        }

        async fn save_progress(&self, _snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
            Err(StorageError::Connection("backend offline".to_owned()))
        }
    }

    #[tokio::test]
    async fn save_failures_warn_but_state_keeps_advancing() {
        let sink = Arc::new(RecordingSink::new());
        let engine =
            GamificationService::load(Arc::new(FailingRepository), Arc::clone(&sink) as _).await;

        engine.add_points(500, "quiz").await;
        assert_eq!(engine.progress().points(), 500);
        assert!(sink.notifications().contains(&Notification::SaveFailed));
    }
}
