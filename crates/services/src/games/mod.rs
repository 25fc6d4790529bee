//! Mini-game state machines.
//!
//! Drag-and-drop is abstracted as id-based placement commands (source item
//! id, target zone id) so every win condition is testable without a UI.
//! Partial progress is never persisted; only point-awarding successes reach
//! the gamification engine.

mod loader;
mod matching;
mod quiz;
mod timeline;

pub use loader::GameLoader;
pub use matching::{MatchOutcome, MatchingGame};
pub use quiz::{QuizFeedback, QuizGame};
pub use timeline::{TimelineGame, TimelinePlacement};

use trek_core::model::GameKind;

/// A running game instance of one of the three variants.
pub enum GameSession {
    Timeline(TimelineGame),
    Quiz(QuizGame),
    Matching(MatchingGame),
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Timeline(_) => "GameSession::Timeline",
            Self::Quiz(_) => "GameSession::Quiz",
            Self::Matching(_) => "GameSession::Matching",
        })
    }
}

impl GameSession {
    #[must_use]
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Timeline(_) => GameKind::Timeline,
            Self::Quiz(_) => GameKind::Quiz,
            Self::Matching(_) => GameKind::Matching,
        }
    }
}
