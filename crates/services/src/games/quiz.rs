use rand::Rng;
use rand::rng;
use std::fmt;
use std::sync::Arc;

use trek_core::model::{QuizQuestion, quiz_bank};

use crate::error::GameError;
use crate::gamification::GamificationService;

/// Points for a correct answer.
const QUIZ_POINTS: u32 = 100;

/// Feedback for one quiz submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizFeedback {
    /// Nothing was selected; nothing was scored.
    NoSelection,
    /// Right answer; points were awarded and the next question is up.
    Correct { points: u32 },
    /// Wrong answer; no state changed.
    Incorrect,
}

impl fmt::Display for QuizFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => write!(f, "Please select an answer"),
            Self::Correct { .. } => write!(f, "Correct!"),
            Self::Incorrect => write!(f, "Try again!"),
        }
    }
}

/// Multiple-choice quiz. Questions are picked uniformly at random from the
/// topic's bank, with no anti-repeat guarantee.
pub struct QuizGame {
    engine: Arc<GamificationService>,
    bank: Vec<QuizQuestion>,
    current: usize,
    correct_answers: u32,
}

impl QuizGame {
    #[must_use]
    pub fn new(topic: &str, engine: Arc<GamificationService>) -> Self {
        let bank = quiz_bank(topic);
        let current = rng().random_range(0..bank.len());
        Self {
            engine,
            bank,
            current,
            correct_answers: 0,
        }
    }

    /// The question currently on screen.
    #[must_use]
    pub fn question(&self) -> &QuizQuestion {
        &self.bank[self.current]
    }

    /// Correct answers so far in this session.
    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    /// Submit the selected option index, or `None` when nothing is selected.
    ///
    /// A correct answer awards 100 points under `"quiz"` and advances to a
    /// fresh random question; a wrong answer changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `GameError::OptionOutOfRange` if the index does not point at
    /// one of the current question's options.
    pub async fn submit(&mut self, selected: Option<usize>) -> Result<QuizFeedback, GameError> {
        let Some(index) = selected else {
            return Ok(QuizFeedback::NoSelection);
        };

        let options = self.question().options().len();
        if index >= options {
            return Err(GameError::OptionOutOfRange { index, options });
        }

        if index != self.question().correct() {
            return Ok(QuizFeedback::Incorrect);
        }

        self.correct_answers = self.correct_answers.saturating_add(1);
        self.engine.add_points(QUIZ_POINTS, "quiz").await;
        self.current = rng().random_range(0..self.bank.len());
        Ok(QuizFeedback::Correct {
            points: QUIZ_POINTS,
        })
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

    #[tokio::test]
    async fn no_selection_reprompts_without_scoring() {
        let engine = engine().await;
        let mut game = QuizGame::new("history", Arc::clone(&engine));

        let feedback = game.submit(None).await.unwrap();
        assert_eq!(feedback, QuizFeedback::NoSelection);
        assert_eq!(engine.progress().points(), 0);
    }

    #[tokio::test]
    async fn correct_answer_awards_points_and_advances() {
        let engine = engine().await;
        let mut game = QuizGame::new("civics", Arc::clone(&engine));

        let correct = game.question().correct();
        let feedback = game.submit(Some(correct)).await.unwrap();
        assert_eq!(feedback, QuizFeedback::Correct { points: 100 });
        assert_eq!(game.correct_answers(), 1);
        assert_eq!(engine.progress().points(), 100);
    }

    #[tokio::test]
    async fn wrong_answer_changes_nothing() {
        let engine = engine().await;
        let mut game = QuizGame::new("history", Arc::clone(&engine));

        let question = game.question().clone();
        let wrong = (question.correct() + 1) % question.options().len();
        let feedback = game.submit(Some(wrong)).await.unwrap();
        assert_eq!(feedback, QuizFeedback::Incorrect);
        assert_eq!(game.correct_answers(), 0);
        assert_eq!(engine.progress().points(), 0);
        // Still the same question; the player retries.
        assert_eq!(game.question(), &question);
    }

    #[tokio::test]
    async fn out_of_range_selection_is_a_typed_error() {
        let engine = engine().await;
        let mut game = QuizGame::new("geography", engine);

        let err = game.submit(Some(42)).await.unwrap_err();
        assert!(matches!(err, GameError::OptionOutOfRange { index: 42, .. }));
    }

    #[tokio::test]
    async fn unknown_topic_serves_the_history_bank() {
        let engine = engine().await;
        let game = QuizGame::new("astronomy", engine);
        assert!(quiz_bank("history").contains(game.question()));
    }
}
