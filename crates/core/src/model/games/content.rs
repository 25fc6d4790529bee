use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::Topic;

//
// ─── IDS ───────────────────────────────────────────────────────────────────────
//

/// Unique identifier for a timeline event within one game instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u32);

impl EventId {
    /// Creates a new `EventId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Unique identifier shared by a name card and its target zone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(u32);

impl PairId {
    /// Creates a new `PairId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.0)
    }
}

impl fmt::Debug for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PairId({})", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for EventId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(EventId::new).map_err(|_| ParseIdError {
            kind: "EventId".to_string(),
        })
    }
}

impl FromStr for PairId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(PairId::new).map_err(|_| ParseIdError {
            kind: "PairId".to_string(),
        })
    }
}

//
// ─── CONTENT TYPES ─────────────────────────────────────────────────────────────
//

/// A dated event card for the timeline game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEvent {
    id: EventId,
    date: NaiveDate,
    description: String,
}

impl TimelineEvent {
    #[must_use]
    pub fn new(id: EventId, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id,
            date,
            description: description.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Checks the timeline win condition: every date at least as late as the one
/// before it (non-strict, chronological ascending).
#[must_use]
pub fn is_chronological(events: &[TimelineEvent]) -> bool {
    events
        .windows(2)
        .all(|pair| pair[0].date() <= pair[1].date())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("correct index {correct} is out of range for {options} options")]
    CorrectOutOfRange { correct: usize, options: usize },
}

/// One multiple-choice question with a single correct option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    text: String,
    options: Vec<String>,
    correct: usize,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `QuestionError` if fewer than two options are given or the
    /// correct index does not point at one of them.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct: usize,
    ) -> Result<Self, QuestionError> {
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        if correct >= options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                correct,
                options: options.len(),
            });
        }
        Ok(Self {
            text: text.into(),
            options,
            correct,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }
}

/// A term/definition pair for the matching game. The draggable name card and
/// its fixed target zone share the same `PairId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPair {
    id: PairId,
    term: String,
    definition: String,
    hint: Option<String>,
}

impl MatchPair {
    #[must_use]
    pub fn new(
        id: PairId,
        term: impl Into<String>,
        definition: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            id,
            term: term.into(),
            definition: definition.into(),
            hint,
        }
    }

    #[must_use]
    pub fn id(&self) -> PairId {
        self.id
    }

    /// Label shown on the fixed target zone.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Label on the draggable name card.
    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

//
// ─── CONTENT BANKS ─────────────────────────────────────────────────────────────
//

fn event(id: u32, year: i32, month: u32, day: u32, description: &str) -> TimelineEvent {
    let date = NaiveDate::from_ymd_opt(year, month, day).expect("fixed event date should be valid");
    TimelineEvent::new(EventId::new(id), date, description)
}

fn question(text: &str, options: &[&str], correct: usize) -> QuizQuestion {
    QuizQuestion::new(
        text,
        options.iter().map(|&option| option.to_owned()).collect(),
        correct,
    )
    .expect("fixed question bank should be valid")
}

/// Timeline events to sort. The same founding-era set serves every topic.
#[must_use]
pub fn timeline_events(_topic: &str) -> Vec<TimelineEvent> {
    vec![
        event(1, 1776, 7, 4, "Declaration of Independence"),
        event(2, 1787, 9, 17, "Constitution Signed"),
        event(3, 1803, 4, 30, "Louisiana Purchase"),
    ]
}

/// Quiz questions for a topic. Unknown topics fall back to the history bank.
#[must_use]
pub fn quiz_bank(topic: &str) -> Vec<QuizQuestion> {
    match Topic::from_name(topic).unwrap_or(Topic::History) {
        Topic::History => vec![
            question(
                "Who is known as the Iron Man of India?",
                &[
                    "Sardar Vallabhbhai Patel",
                    "Jawaharlal Nehru",
                    "Subhas Chandra Bose",
                    "Bhagat Singh",
                ],
                0,
            ),
            question(
                "The Quit India Movement was launched in which year?",
                &["1940", "1942", "1943", "1945"],
                1,
            ),
        ],
        Topic::Geography => vec![question(
            "Which is the largest state of India by area?",
            &[
                "Rajasthan",
                "Madhya Pradesh",
                "Maharashtra",
                "Uttar Pradesh",
            ],
            0,
        )],
        Topic::Civics => vec![question(
            "Who was the chairman of the Constitution Drafting Committee?",
            &[
                "Dr. B.R. Ambedkar",
                "Jawaharlal Nehru",
                "Rajendra Prasad",
                "Sardar Patel",
            ],
            0,
        )],
    }
}

/// Matching pairs for a topic. Geography gets its state-map set; everything
/// else uses the civics default.
#[must_use]
pub fn matching_pairs(topic: &str) -> Vec<MatchPair> {
    if Topic::from_name(topic) == Some(Topic::Geography) {
        return vec![
            MatchPair::new(
                PairId::new(1),
                "Map of Rajasthan",
                "Rajasthan",
                Some("Largest state by area, known for Thar Desert".to_owned()),
            ),
            MatchPair::new(
                PairId::new(2),
                "Map of Tamil Nadu",
                "Tamil Nadu",
                Some("Southernmost state, known for temples and culture".to_owned()),
            ),
            MatchPair::new(
                PairId::new(3),
                "Map of Gujarat",
                "Gujarat",
                Some("Westernmost state, known for longest coastline".to_owned()),
            ),
        ];
    }

    vec![
        MatchPair::new(PairId::new(1), "Democracy", "Government by the people", None),
        MatchPair::new(PairId::new(2), "Republic", "Representative government", None),
        MatchPair::new(PairId::new(3), "Federation", "Union of states", None),
    ]
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
