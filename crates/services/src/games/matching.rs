use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use trek_core::model::{MatchPair, PairId, matching_pairs};

use crate::error::GameError;
use crate::gamification::GamificationService;

/// Points for matching every pair.
const MATCHING_POINTS: u32 = 100;

/// Outcome of dropping a name card onto a target zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Ids were equal; the zone is now matched.
    Matched { all_matched: bool },
    /// Ids differed; nothing changed and the card can be retried.
    NotAMatch,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matched { all_matched: true } => {
                write!(f, "Congratulations! All pairs have been matched correctly!")
            }
            Self::Matched { all_matched: false } => write!(f, "That's a match!"),
            Self::NotAMatch => write!(f, "Not a match, try again!"),
        }
    }
}

/// Term/definition matching game. Draggable name cards and fixed target
/// zones share ids; a drop matches only when the ids are equal.
pub struct MatchingGame {
    engine: Arc<GamificationService>,
    pairs: Vec<MatchPair>,
    matched: HashSet<PairId>,
    scored: bool,
}

impl MatchingGame {
    #[must_use]
    pub fn new(topic: &str, engine: Arc<GamificationService>) -> Self {
        Self {
            engine,
            pairs: matching_pairs(topic),
            matched: HashSet::new(),
            scored: false,
        }
    }

    #[must_use]
    pub fn pairs(&self) -> &[MatchPair] {
        &self.pairs
    }

    /// Name cards still waiting to be placed.
    #[must_use]
    pub fn remaining_cards(&self) -> Vec<&MatchPair> {
        self.pairs
            .iter()
            .filter(|pair| !self.matched.contains(&pair.id()))
            .collect()
    }

    #[must_use]
    pub fn is_matched(&self, zone: PairId) -> bool {
        self.matched.contains(&zone)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scored
    }

    /// Drop the name card `card` onto the target zone `zone`.
    ///
    /// A mismatch reports `NotAMatch` and leaves everything untouched so the
    /// card can be retried. Matching the final zone awards 100 points under
    /// `"matching"`, exactly once.
    ///
    /// # Errors
    ///
    /// Returns `GameError::UnknownPair` for ids that exist on neither side
    /// and `GameError::AlreadyMatched` when the card or zone is already done.
    pub async fn drop_card(
        &mut self,
        card: PairId,
        zone: PairId,
    ) -> Result<MatchOutcome, GameError> {
        if !self.pairs.iter().any(|pair| pair.id() == card) {
            return Err(GameError::UnknownPair(card));
        }
        if !self.pairs.iter().any(|pair| pair.id() == zone) {
            return Err(GameError::UnknownPair(zone));
        }
        if self.matched.contains(&card) {
            return Err(GameError::AlreadyMatched(card));
        }
        if self.matched.contains(&zone) {
            return Err(GameError::AlreadyMatched(zone));
        }

        if card != zone {
            return Ok(MatchOutcome::NotAMatch);
        }

        self.matched.insert(card);
        let all_matched = self.matched.len() == self.pairs.len();
        if all_matched && !self.scored {
            self.scored = true;
            self.engine.add_points(MATCHING_POINTS, "matching").await;
        }
        Ok(MatchOutcome::Matched { all_matched })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
