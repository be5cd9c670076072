//! Game state machine
//!
//! A game moves through three states:
//!
//! ```text
//!                accepted guess (not solved, < 6 guesses)
//!                 ┌──────────┐
//!                 ▼          │
//!   new ──▶ InProgress ──────┘
//!                 │
//!                 ├── accepted guess with all-C feedback ──▶ Won
//!                 └── 6th accepted guess, not solved ──────▶ Exhausted
//! ```
//!
//! Accepted guesses are the only transition. `Won` and `Exhausted` are terminal.

use crate::api::StatRecord;
use crate::core::{Feedback, Guess, Mode, NUM_GUESSES};
use std::fmt;
use thiserror::Error;

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Exhausted,
}

impl Status {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Exhausted => "out of guesses",
        })
    }
}

/// Rejected state transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("game is already {0}")]
    Finished(Status),
    #[error("result was issued for game {issued}, but game {current} is active")]
    Stale { issued: u64, current: u64 },
}

/// State of the active game
///
/// `guesses` and `feedback` are index-aligned: row `i` of the board is
/// `(guesses[i], feedback[i])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    mode: Mode,
    generation: u64,
    guesses: Vec<Guess>,
    feedback: Vec<Feedback>,
}

impl GameState {
    /// Start an empty game
    ///
    /// `generation` identifies the game; results computed for another generation
    /// are refused by [`GameState::record`].
    #[must_use]
    pub fn new(mode: Mode, generation: u64) -> Self {
        Self {
            mode,
            generation,
            guesses: Vec::with_capacity(NUM_GUESSES),
            feedback: Vec::with_capacity(NUM_GUESSES),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    #[must_use]
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    #[must_use]
    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }

    /// Board rows in play order
    pub fn rows(&self) -> impl Iterator<Item = (&Guess, &Feedback)> {
        self.guesses.iter().zip(&self.feedback)
    }

    #[must_use]
    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.feedback.last()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.guesses.len() >= NUM_GUESSES
    }

    #[must_use]
    pub fn status(&self) -> Status {
        if self.last_feedback().is_some_and(Feedback::is_solved) {
            Status::Won
        } else if self.is_full() {
            Status::Exhausted
        } else {
            Status::InProgress
        }
    }

    /// Append an accepted guess and its feedback
    ///
    /// `token` is the generation the guess was checked under. Returns the status
    /// after the transition.
    ///
    /// # Errors
    /// - `StateError::Stale` if `token` does not name this game
    /// - `StateError::Finished` if the game is already won or exhausted
    pub fn record(
        &mut self,
        token: u64,
        guess: Guess,
        feedback: Feedback,
    ) -> Result<Status, StateError> {
        if token != self.generation {
            return Err(StateError::Stale {
                issued: token,
                current: self.generation,
            });
        }

        let status = self.status();
        if status.is_terminal() {
            return Err(StateError::Finished(status));
        }

        self.guesses.push(guess);
        self.feedback.push(feedback);
        Ok(self.status())
    }

    /// Stat record for this game, if it has finished
    #[must_use]
    pub fn stat_record(&self) -> Option<StatRecord> {
        match self.status() {
            Status::InProgress => None,
            status => Some(StatRecord {
                win: status == Status::Won,
                num_guesses: self.guess_count(),
                mode: self.mode.clone(),
            }),
        }
    }
}
