mod badge;
pub mod games;
mod preferences;
pub mod progress;

pub use badge::{BadgeCategory, achievement_badge};
pub use games::{
    EventId, GameKind, MatchPair, PairId, QuestionError, QuizQuestion, TimelineEvent, Topic,
    is_chronological, matching_pairs, quiz_bank, timeline_events,
};
pub use preferences::{AccessibilityPrefs, TextSize};
pub use progress::{POINTS_PER_LEVEL, ProgressDataError, ProgressRecord, level_for_points};
