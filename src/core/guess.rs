//! Guess representation
//!
//! A `Guess` is a normalized word ready to be sent to the game service: trimmed,
//! uppercased, exactly [`WORD_LENGTH`] ASCII letters.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Number of letters in every guess and solution
pub const WORD_LENGTH: usize = 5;

/// Number of guesses allowed per game
pub const NUM_GUESSES: usize = 6;

/// A normalized, uppercase guess word
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Guess(String);

/// Error type for words that cannot be guesses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("guess must be exactly {WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("guess must contain only ASCII letters")]
    InvalidCharacters,
}

impl Guess {
    /// Normalize raw input into a guess
    ///
    /// Surrounding whitespace is dropped and letters are uppercased, so `"crane"`,
    /// `" Crane "` and `"CRANE"` all produce the same guess.
    ///
    /// # Errors
    /// Returns `GuessError` if the trimmed input is not exactly [`WORD_LENGTH`]
    /// ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_client::core::Guess;
    ///
    /// let guess = Guess::parse("crane").unwrap();
    /// assert_eq!(guess.as_str(), "CRANE");
    ///
    /// assert!(Guess::parse("cranes").is_err());
    /// assert!(Guess::parse("cr4ne").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, GuessError> {
        let text = raw.trim().to_ascii_uppercase();

        if !text.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GuessError::InvalidCharacters);
        }

        if text.len() != WORD_LENGTH {
            return Err(GuessError::InvalidLength(text.chars().count()));
        }

        Ok(Self(text))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the letters of the guess
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Guess {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
