//! Announcement channel between business logic and whatever surface renders
//! it (live region, console, test recorder). The engine only ever writes.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use trek_core::model::GameKind;

/// A user-facing event emitted by the engine or the game loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    PointsAwarded {
        amount: u32,
        category: String,
        total: u64,
    },
    LevelUp {
        level: u32,
    },
    BadgeEarned {
        name: String,
    },
    StreakUpdated {
        streak: u32,
    },
    GameStarted {
        kind: GameKind,
        topic: String,
    },
    GameClosed,
    SaveFailed,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointsAwarded {
                amount,
                category,
                total,
            } => write!(
                f,
                "Earned {amount} points in {category}. Total points: {total}"
            ),
            Self::LevelUp { level } => {
                write!(f, "Congratulations! You've reached level {level}!")
            }
            Self::BadgeEarned { name } => write!(f, "New badge earned: {name}"),
            Self::StreakUpdated { streak } => write!(f, "Current streak: {streak} days"),
            Self::GameStarted { kind, topic } => {
                write!(f, "{topic} {kind} game started. Good luck!")
            }
            Self::GameClosed => write!(f, "Game closed"),
            Self::SaveFailed => {
                write!(f, "Progress could not be saved. Your session continues.")
            }
        }
    }
}

/// Write-only sink for announcements.
pub trait AnnouncementSink: Send + Sync {
    fn announce(&self, notification: &Notification);
}

/// Sink that drops everything. Useful where announcements are irrelevant.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AnnouncementSink for NullSink {
    fn announce(&self, _notification: &Notification) {}
}

/// Sink that records announcements in order, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AnnouncementSink for RecordingSink {
    fn announce(&self, notification: &Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
