/// Why a badge was awarded. Categories group badges for display; identity is
/// still the badge name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeCategory {
    Streak,
    Level,
    Achievement,
}

impl BadgeCategory {
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Streak => "Streak",
            Self::Level => "Level",
            Self::Achievement => "Achievement",
        }
    }
}

/// Fixed subject/action achievement table.
///
/// Unknown pairs return `None`; the caller ignores them silently rather than
/// treating them as an error.
#[must_use]
pub fn achievement_badge(subject: &str, action: &str) -> Option<&'static str> {
    match (subject, action) {
        ("history", "timelinesMastered") => Some("Timeline Master"),
        ("history", "periodsCompleted") => Some("History Explorer"),
        ("history", "quizzesPassed") => Some("History Scholar"),
        ("geography", "mapsCompleted") => Some("Map Master"),
        ("geography", "locationsIdentified") => Some("Globe Trotter"),
        ("geography", "arToursCompleted") => Some("Virtual Explorer"),
        ("civics", "constitutionLessons") => Some("Constitution Expert"),
        ("civics", "governmentSimulations") => Some("Civic Leader"),
        ("civics", "rightsChallenges") => Some("Rights Champion"),
        _ => None,
    }
}
