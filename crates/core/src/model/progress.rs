use thiserror::Error;

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: u64 = 1000;

/// Level derived from a point total. 0 points is level 1; a total sitting
/// exactly on a multiple of 1000 rounds down to the lower boundary, so
/// 1000 points is level 2.
#[must_use]
pub fn level_for_points(points: u64) -> u32 {
    u32::try_from(points / POINTS_PER_LEVEL).map_or(u32::MAX, |level| level.saturating_add(1))
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressDataError {
    #[error("stored level {stored} does not match level {derived} derived from {points} points")]
    LevelMismatch {
        stored: u32,
        derived: u32,
        points: u64,
    },

    #[error("duplicate badge name: {0}")]
    DuplicateBadge(String),
}

/// Snapshot of a learner's gamification state.
///
/// The level is always derived from points; badges are unique by name and
/// keep insertion order for display. Badges never shrink within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    points: u64,
    level: u32,
    streak: u32,
    badges: Vec<String>,
}

impl ProgressRecord {
    /// Fresh record: zero points, level 1, no streak, no badges.
    #[must_use]
    pub fn new() -> Self {
        Self {
            points: 0,
            level: 1,
            streak: 0,
            badges: Vec::new(),
        }
    }

    /// Rehydrate a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressDataError::LevelMismatch` if the stored level does not
    /// match the level derived from the stored points, and
    /// `ProgressDataError::DuplicateBadge` if a badge name appears twice.
    pub fn from_persisted(
        points: u64,
        level: u32,
        streak: u32,
        badges: Vec<String>,
    ) -> Result<Self, ProgressDataError> {
        let derived = level_for_points(points);
        if level != derived {
            return Err(ProgressDataError::LevelMismatch {
                stored: level,
                derived,
                points,
            });
        }

        for (index, name) in badges.iter().enumerate() {
            if badges[..index].contains(name) {
                return Err(ProgressDataError::DuplicateBadge(name.clone()));
            }
        }

        Ok(Self {
            points,
            level,
            streak,
            badges,
        })
    }

    #[must_use]
    pub fn points(&self) -> u64 {
        self.points
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn badges(&self) -> &[String] {
        &self.badges
    }

    #[must_use]
    pub fn has_badge(&self, name: &str) -> bool {
        self.badges.iter().any(|badge| badge == name)
    }

    /// Add points and re-derive the level. Returns the new level if the total
    /// crossed a boundary.
    pub fn add_points(&mut self, amount: u32) -> Option<u32> {
        self.points = self.points.saturating_add(u64::from(amount));
        let derived = level_for_points(self.points);
        if derived > self.level {
            self.level = derived;
            Some(derived)
        } else {
            None
        }
    }

    /// Record a completed activity; returns the extended streak.
    pub fn extend_streak(&mut self) -> u32 {
        self.streak = self.streak.saturating_add(1);
        self.streak
    }

    /// A missed activity drops the streak back to zero.
    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    /// Insert a badge by name. Returns `true` only when the badge was not
    /// already present, so repeated awards stay idempotent.
    pub fn insert_badge(&mut self, name: &str) -> bool {
        if self.has_badge(name) {
            return false;
        }
        self.badges.push(name.to_owned());
        true
    }
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tracks_points_after_every_addition() {
        let mut record = ProgressRecord::new();
        for amount in [100, 250, 400, 250, 999, 1, 3000] {
            record.add_points(amount);
            assert_eq!(record.level(), level_for_points(record.points()));
        }
    }

    #[test]
    fn exact_thousand_is_level_two() {
        assert_eq!(level_for_points(999), 1);
        assert_eq!(level_for_points(1000), 2);
        assert_eq!(level_for_points(1999), 2);
        assert_eq!(level_for_points(2000), 3);
    }

    #[test]
    fn add_points_reports_level_up_once() {
        let mut record = ProgressRecord::new();
        assert_eq!(record.add_points(999), None);
        assert_eq!(record.add_points(1), Some(2));
        assert_eq!(record.add_points(1), None);
    }

    #[test]
    fn badge_insertion_is_idempotent() {
        let mut record = ProgressRecord::new();
        assert!(record.insert_badge("Timeline Master"));
        assert!(!record.insert_badge("Timeline Master"));
        assert_eq!(record.badges().len(), 1);
    }

    #[test]
    fn streak_extends_and_resets() {
        let mut record = ProgressRecord::new();
        assert_eq!(record.extend_streak(), 1);
        assert_eq!(record.extend_streak(), 2);
        record.reset_streak();
        assert_eq!(record.streak(), 0);
    }

    #[test]
    fn from_persisted_rejects_wrong_level() {
        let err = ProgressRecord::from_persisted(2500, 2, 0, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            ProgressDataError::LevelMismatch {
                stored: 2,
                derived: 3,
                points: 2500
            }
        ));
    }

    #[test]
    fn from_persisted_rejects_duplicate_badges() {
        let badges = vec!["Map Master".to_owned(), "Map Master".to_owned()];
        let err = ProgressRecord::from_persisted(0, 1, 0, badges).unwrap_err();
        assert!(matches!(err, ProgressDataError::DuplicateBadge(name) if name == "Map Master"));
    }

    #[test]
    fn from_persisted_accepts_valid_state() {
        let record =
            ProgressRecord::from_persisted(1200, 2, 4, vec!["Globe Trotter".to_owned()]).unwrap();
        assert_eq!(record.points(), 1200);
        assert_eq!(record.level(), 2);
        assert_eq!(record.streak(), 4);
        assert!(record.has_badge("Globe Trotter"));
    }
}
