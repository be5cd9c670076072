//! Play modes
//!
//! `user` is manual play; every other name selects a guess-generation strategy
//! implemented by the service.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Name that cannot select a strategy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("strategy name is empty")]
    Empty,
    #[error("`user` is manual play, not a strategy")]
    User,
}

/// The play strategy in effect
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Guesses are typed by the player
    #[default]
    User,
    /// Guesses come from the named strategy on the service
    Strategy(String),
}

impl Mode {
    /// Wire name of the manual mode
    pub const USER: &'static str = "user";

    /// Strategies shipped by the reference service
    pub const KNOWN_STRATEGIES: &'static [&'static str] = &[
        "only_matched_patterns",
        "letter_frequency",
        "entropy",
        "tfidf",
    ];

    /// Create mode from its wire name
    ///
    /// Matching is case-insensitive; surrounding whitespace is ignored.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        if name == Self::USER {
            Self::User
        } else {
            Self::Strategy(name)
        }
    }

    /// Create a strategy mode, refusing `user` and blank names
    ///
    /// # Errors
    /// Returns `ModeError` when `name` does not name a strategy.
    pub fn strategy(name: &str) -> Result<Self, ModeError> {
        match Self::from_name(name) {
            Self::User => Err(ModeError::User),
            Self::Strategy(name) if name.is_empty() => Err(ModeError::Empty),
            mode => Ok(mode),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::User => Self::USER,
            Self::Strategy(name) => name,
        }
    }

    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }

    /// The default mode cycle: manual play followed by the given strategies
    #[must_use]
    pub fn cycle(strategies: &[String]) -> Vec<Self> {
        std::iter::once(Self::User)
            .chain(strategies.iter().map(|s| Self::from_name(s)))
            .filter(|m| !m.name().is_empty())
            .fold(Vec::new(), |mut modes, mode| {
                if !modes.contains(&mode) {
                    modes.push(mode);
                }
                modes
            })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Mode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
