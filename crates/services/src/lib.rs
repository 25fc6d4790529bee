#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod games;
pub mod gamification;
pub mod notify;
pub mod preferences;

pub use app_services::AppServices;
pub use error::{AppServicesError, GameError, PreferencesServiceError};
pub use games::{
    GameLoader, GameSession, MatchOutcome, MatchingGame, QuizFeedback, QuizGame, TimelineGame,
    TimelinePlacement,
};
pub use gamification::GamificationService;
pub use notify::{AnnouncementSink, Notification, NullSink, RecordingSink};
pub use preferences::PreferencesService;
