use rand::rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::sync::Arc;

use trek_core::model::{EventId, TimelineEvent, is_chronological, timeline_events};

use crate::error::GameError;
use crate::gamification::GamificationService;

/// Points for arranging the full timeline in order.
const TIMELINE_POINTS: u32 = 50;

/// Outcome of placing one event on the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelinePlacement {
    /// Event accepted, more events remain in the pool.
    Placed { remaining: usize },
    /// Full set placed in chronological order; points were awarded.
    Completed { points: u32 },
    /// Full set placed but out of order. Reset and retry.
    OutOfOrder,
}

impl fmt::Display for TimelinePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed { remaining } => write!(f, "Event placed. {remaining} left to place."),
            Self::Completed { .. } => write!(f, "Timeline ordered correctly! Well done!"),
            Self::OutOfOrder => write!(f, "Those events are not in order. Reset and try again."),
        }
    }
}

/// Timeline ordering game: drag dated events into one slot list, earliest
/// first. Scores exactly once per instance.
pub struct TimelineGame {
    engine: Arc<GamificationService>,
    pool: Vec<TimelineEvent>,
    placed: Vec<TimelineEvent>,
    scored: bool,
}

impl TimelineGame {
    #[must_use]
    pub fn new(topic: &str, engine: Arc<GamificationService>) -> Self {
        let mut pool = timeline_events(topic);
        pool.shuffle(&mut rng());
        Self {
            engine,
            pool,
            placed: Vec::new(),
            scored: false,
        }
    }

    /// Events still waiting in the pool.
    #[must_use]
    pub fn pool(&self) -> &[TimelineEvent] {
        &self.pool
    }

    /// Events already placed, in placement order.
    #[must_use]
    pub fn placed(&self) -> &[TimelineEvent] {
        &self.placed
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scored
    }

    /// Place the next event into the slot list and re-check the ordering.
    ///
    /// The win condition only fires once the full set (more than one event)
    /// sits in non-strict chronological order; it awards 50 points under the
    /// `"timeline"` category, exactly once per game instance.
    ///
    /// # Errors
    ///
    /// Returns `GameError::AlreadyPlaced` if the event is already on the
    /// timeline and `GameError::UnknownEvent` if the id matches nothing.
    pub async fn place(&mut self, id: EventId) -> Result<TimelinePlacement, GameError> {
        if self.placed.iter().any(|event| event.id() == id) {
            return Err(GameError::AlreadyPlaced(id));
        }
        let index = self
            .pool
            .iter()
            .position(|event| event.id() == id)
            .ok_or(GameError::UnknownEvent(id))?;

        let event = self.pool.remove(index);
        self.placed.push(event);

        if !self.pool.is_empty() {
            return Ok(TimelinePlacement::Placed {
                remaining: self.pool.len(),
            });
        }

        if self.placed.len() > 1 && is_chronological(&self.placed) && !self.scored {
            self.scored = true;
            self.engine.add_points(TIMELINE_POINTS, "timeline").await;
            return Ok(TimelinePlacement::Completed {
                points: TIMELINE_POINTS,
            });
        }

        Ok(TimelinePlacement::OutOfOrder)
    }

    /// Return all placed events to the pool for another attempt. Does nothing
    /// once the game has been scored.
    pub fn reset(&mut self) {
        if self.scored {
            return;
        }
        self.pool.append(&mut self.placed);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NullSink;
    use storage::repository::InMemoryRepository;

    async fn engine() -> Arc<GamificationService> {
        Arc::new(
            GamificationService::load(Arc::new(InMemoryRepository::new()), Arc::new(NullSink))
                .await,
        )
    }

    fn id_by_description(game: &TimelineGame, description: &str) -> EventId {
        game.pool()
            .iter()
            .find(|event| event.description() == description)
            .map(TimelineEvent::id)
            .expect("event in pool")
    }

    #[tokio::test]
    async fn chronological_placement_awards_fifty_points_once() {
        let engine = engine().await;
        let mut game = TimelineGame::new("history", Arc::clone(&engine));

        for description in [
            "Declaration of Independence",
            "Constitution Signed",
            "Louisiana Purchase",
        ] {
            let id = id_by_description(&game, description);
            let placement = game.place(id).await.unwrap();
            if game.pool().is_empty() {
                assert_eq!(placement, TimelinePlacement::Completed { points: 50 });
            }
        }

        assert!(game.is_complete());
        let record = engine.progress();
        assert_eq!(record.points(), 50);
    }

    #[tokio::test]
    async fn out_of_order_placement_scores_nothing() {
        let engine = engine().await;
        let mut game = TimelineGame::new("history", Arc::clone(&engine));

        // 1787 before 1776 breaks chronological order.
        for description in [
            "Constitution Signed",
            "Declaration of Independence",
            "Louisiana Purchase",
        ] {
            let id = id_by_description(&game, description);
            let _ = game.place(id).await.unwrap();
        }

        assert!(!game.is_complete());
        assert_eq!(engine.progress().points(), 0);
    }

    #[tokio::test]
    async fn reset_allows_retry_after_a_failed_attempt() {
        let engine = engine().await;
        let mut game = TimelineGame::new("history", Arc::clone(&engine));

        for description in [
            "Louisiana Purchase",
            "Constitution Signed",
            "Declaration of Independence",
        ] {
            let id = id_by_description(&game, description);
            let _ = game.place(id).await.unwrap();
        }
        assert!(!game.is_complete());

        game.reset();
        assert_eq!(game.pool().len(), 3);
        assert!(game.placed().is_empty());

        for description in [
            "Declaration of Independence",
            "Constitution Signed",
            "Louisiana Purchase",
        ] {
            let id = id_by_description(&game, description);
            let _ = game.place(id).await.unwrap();
        }
        assert!(game.is_complete());
        assert_eq!(engine.progress().points(), 50);
    }

    #[tokio::test]
    async fn bad_placement_commands_are_typed_errors() {
        let engine = engine().await;
        let mut game = TimelineGame::new("history", engine);

        let err = game.place(EventId::new(99)).await.unwrap_err();
        assert!(matches!(err, GameError::UnknownEvent(_)));

        let id = game.pool()[0].id();
        let _ = game.place(id).await.unwrap();
        let err = game.place(id).await.unwrap_err();
        assert!(matches!(err, GameError::AlreadyPlaced(_)));
    }
}
