//! Game service API
//!
//! The client is a consumer of four HTTP endpoints on an external game service.
//! [`GameApi`] abstracts them so the controller can run against the real service
//! ([`HttpApi`]) or any in-process implementation.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/get_solution_index/` | [`GameApi::solution_index`] |
//! | POST | `/check_guess/?index=<id>&guess=<word>` | [`GameApi::check_guess`] |
//! | POST | `/generate_guess/` | [`GameApi::generate_guess`] |
//! | POST | `/insert_stat/?win=<0/1>&num_guesses=<n>&mode=<name>` | [`GameApi::insert_stat`] |

mod http;
pub mod types;

pub use http::HttpApi;
pub use types::{Leaderboard, ModeStats, SolutionId, StatRecord};

use crate::core::{CheckResult, Feedback, Guess, Mode};
use reqwest::StatusCode;
use std::fmt;
use std::future::Future;
use thiserror::Error;

/// Endpoints of the game service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SolutionIndex,
    CheckGuess,
    GenerateGuess,
    InsertStat,
}

impl Endpoint {
    /// Path relative to the service base URL
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::SolutionIndex => "get_solution_index/",
            Self::CheckGuess => "check_guess/",
            Self::GenerateGuess => "generate_guess/",
            Self::InsertStat => "insert_stat/",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Errors talking to the game service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or body decoding failure
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success status
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: Endpoint,
        status: StatusCode,
    },
    /// The response decoded but breaks the contract
    #[error("{endpoint} returned a malformed response: {reason}")]
    Malformed { endpoint: Endpoint, reason: String },
}

impl ApiError {
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Http { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Malformed { endpoint, .. } => *endpoint,
        }
    }
}

/// Operations offered by the game service
///
/// Futures are `Send` so the controller can run refreshes and stat reports as
/// detached tasks.
pub trait GameApi: Send + Sync + 'static {
    /// Pick a new solution for the next game
    fn solution_index(&self) -> impl Future<Output = Result<SolutionId, ApiError>> + Send;

    /// Check a guess against the solution named by `solution`
    fn check_guess(
        &self,
        solution: SolutionId,
        guess: &Guess,
    ) -> impl Future<Output = Result<CheckResult, ApiError>> + Send;

    /// Ask the strategy named by `mode` for the next guess, given the game so far
    fn generate_guess(
        &self,
        mode: &Mode,
        guesses: &[Guess],
        feedback: &[Feedback],
    ) -> impl Future<Output = Result<Guess, ApiError>> + Send;

    /// Store the outcome of a finished game and return the updated per-mode stats
    fn insert_stat(
        &self,
        record: &StatRecord,
    ) -> impl Future<Output = Result<Leaderboard, ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::SolutionIndex.path(), "get_solution_index/");
        assert_eq!(Endpoint::CheckGuess.to_string(), "/check_guess/");
        assert_eq!(Endpoint::GenerateGuess.to_string(), "/generate_guess/");
        assert_eq!(Endpoint::InsertStat.to_string(), "/insert_stat/");
    }

    #[test]
    fn status_error_message() {
        let err = ApiError::Status {
            endpoint: Endpoint::GenerateGuess,
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.endpoint(), Endpoint::GenerateGuess);
        assert_eq!(
            err.to_string(),
            "/generate_guess/ returned 500 Internal Server Error"
        );
    }
}
