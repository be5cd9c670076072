//! Per-letter feedback returned by the game service
//!
//! The service encodes feedback as a string of [`WORD_LENGTH`] characters:
//! - `C` = correct letter, correct position
//! - `M` = letter in the word, misplaced
//! - `W` = letter not in the word
//!
//! A guess the service does not accept is answered with the literal `INVALID`
//! instead, which parses to [`CheckResult::Invalid`].

use super::guess::WORD_LENGTH;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Literal returned by the check endpoint for unrecognized guesses
pub const INVALID_LITERAL: &str = "INVALID";

/// Verdict for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    Misplaced,
    Wrong,
}

impl Verdict {
    /// Parse a wire character (`C`, `M`, `W`)
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Self::Correct),
            'M' => Some(Self::Misplaced),
            'W' => Some(Self::Wrong),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Correct => 'C',
            Self::Misplaced => 'M',
            Self::Wrong => 'W',
        }
    }

    /// Visual class name used by the board
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Misplaced => "misplaced",
            Self::Wrong => "wrong",
        }
    }
}

/// Feedback for one accepted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([Verdict; WORD_LENGTH]);

/// Error type for feedback strings that break the wire contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("feedback must be {WORD_LENGTH} characters, got {0}")]
    InvalidLength(usize),
    #[error("feedback contains unknown verdict {0:?}")]
    UnknownVerdict(char),
}

impl Feedback {
    /// All letters correct
    pub const SOLVED: Self = Self([Verdict::Correct; WORD_LENGTH]);

    #[must_use]
    pub const fn new(verdicts: [Verdict; WORD_LENGTH]) -> Self {
        Self(verdicts)
    }

    /// Parse a feedback string like `"MWWCM"`
    ///
    /// # Errors
    /// Returns `FeedbackError` if the string is not exactly [`WORD_LENGTH`]
    /// characters drawn from `C`, `M`, `W`.
    ///
    /// # Examples
    /// ```
    /// use wordle_client::core::{Feedback, Verdict};
    ///
    /// let feedback = Feedback::parse("MWWCM").unwrap();
    /// assert_eq!(feedback.verdicts()[3], Verdict::Correct);
    /// assert!(!feedback.is_solved());
    /// assert!(Feedback::parse("CCCCC").unwrap().is_solved());
    /// ```
    pub fn parse(s: &str) -> Result<Self, FeedbackError> {
        let count = s.chars().count();
        if count != WORD_LENGTH {
            return Err(FeedbackError::InvalidLength(count));
        }

        let mut verdicts = [Verdict::Wrong; WORD_LENGTH];
        for (slot, c) in verdicts.iter_mut().zip(s.chars()) {
            *slot = Verdict::from_char(c).ok_or(FeedbackError::UnknownVerdict(c))?;
        }

        Ok(Self(verdicts))
    }

    #[inline]
    #[must_use]
    pub const fn verdicts(&self) -> &[Verdict; WORD_LENGTH] {
        &self.0
    }

    /// Check if every letter is correct
    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    #[must_use]
    pub fn count(&self, verdict: Verdict) -> usize {
        self.0.iter().filter(|&&v| v == verdict).count()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for verdict in &self.0 {
            write!(f, "{}", verdict.as_char())?;
        }
        Ok(())
    }
}

impl Serialize for Feedback {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::str::FromStr for Feedback {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Result of checking a guess against the active solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// The guess is a recognized word; feedback applies
    Valid(Feedback),
    /// The service rejected the guess (unknown word or wrong shape)
    Invalid,
}

impl CheckResult {
    /// Interpret the `feedback` field of a check response
    ///
    /// # Errors
    /// Returns `FeedbackError` if the value is neither `INVALID` nor a well-formed
    /// feedback string.
    pub fn parse(s: &str) -> Result<Self, FeedbackError> {
        if s == INVALID_LITERAL {
            Ok(Self::Invalid)
        } else {
            Feedback::parse(s).map(Self::Valid)
        }
    }
}
