//! Core domain types for the game client
//!
//! Pure value types with no I/O: guesses, feedback and play modes.

mod feedback;
mod guess;
mod mode;

pub use feedback::{CheckResult, Feedback, FeedbackError, INVALID_LITERAL, Verdict};
pub use guess::{Guess, GuessError, NUM_GUESSES, WORD_LENGTH};
pub use mode::{Mode, ModeError};
