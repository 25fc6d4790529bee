use std::sync::Arc;

use trek_core::model::GameKind;

use crate::error::GameError;
use crate::games::{GameSession, MatchingGame, QuizGame, TimelineGame};
use crate::gamification::GamificationService;
use crate::notify::{AnnouncementSink, Notification};

/// Builds game sessions from a `(kind, topic)` request.
///
/// An unsupported kind is a recoverable error; the caller shows it next to a
/// retry affordance and can simply call `start` again.
#[derive(Clone)]
pub struct GameLoader {
    engine: Arc<GamificationService>,
    sink: Arc<dyn AnnouncementSink>,
}

impl GameLoader {
    #[must_use]
    pub fn new(engine: Arc<GamificationService>, sink: Arc<dyn AnnouncementSink>) -> Self {
        Self { engine, sink }
    }

    /// Construct a game for the requested kind and topic.
    ///
    /// # Errors
    ///
    /// Returns `GameError::UnknownKind` when the kind string matches no game.
    pub fn start(&self, kind: &str, topic: &str) -> Result<GameSession, GameError> {
        let kind: GameKind = kind
            .parse()
            .map_err(|_| GameError::UnknownKind(kind.to_owned()))?;

        let session = match kind {
            GameKind::Timeline => {
                GameSession::Timeline(TimelineGame::new(topic, Arc::clone(&self.engine)))
            }
            GameKind::Quiz => GameSession::Quiz(QuizGame::new(topic, Arc::clone(&self.engine))),
            GameKind::Matching => {
                GameSession::Matching(MatchingGame::new(topic, Arc::clone(&self.engine)))
            }
        };

        self.sink.announce(&Notification::GameStarted {
            kind,
            topic: topic.to_owned(),
        });
        Ok(session)
    }

    /// Announce that the player closed the current game. Tearing down a game
    /// discards its partial progress; only scored successes were persisted.
    pub fn close(&self) {
        self.sink.announce(&Notification::GameClosed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use storage::repository::InMemoryRepository;

    async fn loader() -> (GameLoader, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let engine = Arc::new(
            GamificationService::load(
                Arc::new(InMemoryRepository::new()),
                Arc::clone(&sink) as Arc<dyn AnnouncementSink>,
            )
            .await,
        );
        (
            GameLoader::new(engine, Arc::clone(&sink) as Arc<dyn AnnouncementSink>),
            sink,
        )
    }

    #[tokio::test]
    async fn starts_each_supported_kind() {
        let (loader, sink) = loader().await;

        assert!(matches!(
            loader.start("timeline", "history").unwrap(),
            GameSession::Timeline(_)
        ));
        assert!(matches!(
            loader.start("QUIZ", "geography").unwrap(),
            GameSession::Quiz(_)
        ));
        assert!(matches!(
            loader.start("matching", "civics").unwrap(),
            GameSession::Matching(_)
        ));

        let started = sink
            .notifications()
            .iter()
            .filter(|n| matches!(n, Notification::GameStarted { .. }))
            .count();
        assert_eq!(started, 3);
    }

    #[tokio::test]
    async fn unknown_kind_is_recoverable_and_retryable() {
        let (loader, _sink) = loader().await;

        let err = loader.start("puzzle", "history").unwrap_err();
        assert!(matches!(err, GameError::UnknownKind(raw) if raw == "puzzle"));

        // The retry affordance is just calling start again.
        assert!(loader.start("quiz", "history").is_ok());
    }

    #[tokio::test]
    async fn closing_announces_teardown() {
        let (loader, sink) = loader().await;
        loader.close();
        assert!(sink.notifications().contains(&Notification::GameClosed));
    }
}
