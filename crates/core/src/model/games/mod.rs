mod content;

pub use content::{
    EventId, MatchPair, PairId, ParseIdError, QuestionError, QuizQuestion, TimelineEvent,
    is_chronological, matching_pairs, quiz_bank, timeline_events,
};

use std::fmt;
use std::str::FromStr;

/// The three mini-game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Timeline,
    Quiz,
    Matching,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timeline => "timeline",
            Self::Quiz => "quiz",
            Self::Matching => "matching",
        };
        write!(f, "{name}")
    }
}

/// Error type for parsing a game kind from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGameKindError {
    raw: String,
}

impl fmt::Display for ParseGameKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported game kind: {}", self.raw)
    }
}

impl std::error::Error for ParseGameKindError {}

impl FromStr for GameKind {
    type Err = ParseGameKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "timeline" => Ok(Self::Timeline),
            "quiz" => Ok(Self::Quiz),
            "matching" => Ok(Self::Matching),
            _ => Err(ParseGameKindError { raw: s.to_owned() }),
        }
    }
}

/// Subjects with dedicated game content.
///
/// Topics are lenient by design: an unrecognized topic falls back to a
/// default bank instead of failing, the way the site has always behaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    History,
    Geography,
    Civics,
}

impl Topic {
    /// Case-insensitive lookup; `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "history" => Some(Self::History),
            "geography" => Some(Self::Geography),
            "civics" => Some(Self::Civics),
            _ => None,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::History => "history",
            Self::Geography => "geography",
            Self::Civics => "civics",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_kind_parses_case_insensitively() {
        assert_eq!("Quiz".parse::<GameKind>().unwrap(), GameKind::Quiz);
        assert_eq!("TIMELINE".parse::<GameKind>().unwrap(), GameKind::Timeline);
        assert!("puzzle".parse::<GameKind>().is_err());
    }

    #[test]
    fn topic_lookup_is_lenient() {
        assert_eq!(Topic::from_name("Geography"), Some(Topic::Geography));
        assert_eq!(Topic::from_name("astronomy"), None);
    }
}
