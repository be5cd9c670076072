//! Wire types for the game service

use crate::core::{Feedback, Guess, Mode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of the hidden solution word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionId(pub i64);

impl fmt::Display for SolutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response of `GET /get_solution_index/`
#[derive(Debug, Deserialize)]
pub struct SolutionIndexResponse {
    pub index: SolutionId,
}

/// Response of `POST /check_guess/`
#[derive(Debug, Deserialize)]
pub struct CheckGuessResponse {
    pub feedback: String,
}

/// Body of `POST /generate_guess/`
#[derive(Debug, Serialize)]
pub struct GenerateGuessRequest<'a> {
    pub mode: &'a Mode,
    pub current_guesses: &'a [Guess],
    pub guess_feedback: &'a [Feedback],
}

/// Response of `POST /generate_guess/`
#[derive(Debug, Deserialize)]
pub struct GenerateGuessResponse {
    pub guess: String,
}

/// Outcome of one finished game, as reported to `POST /insert_stat/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    pub win: bool,
    pub num_guesses: usize,
    pub mode: Mode,
}

impl StatRecord {
    /// Query parameters in the order the service documents them
    #[must_use]
    pub fn query(&self) -> [(&'static str, String); 3] {
        [
            ("win", u8::from(self.win).to_string()),
            ("num_guesses", self.num_guesses.to_string()),
            ("mode", self.mode.name().to_string()),
        ]
    }
}

/// Aggregated results for one mode
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModeStats {
    pub mode: String,
    pub win_rate: f64,
    pub avg_guesses: f64,
}

/// Per-mode statistics, ordered by the service (best win rate first)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Leaderboard {
    pub modes: Vec<ModeStats>,
}

impl Leaderboard {
    #[must_use]
    pub fn get(&self, mode: &str) -> Option<&ModeStats> {
        self.modes.iter().find(|s| s.mode == mode)
    }
}
