//! `reqwest` implementation of [`GameApi`]

use super::types::{
    CheckGuessResponse, GenerateGuessRequest, GenerateGuessResponse, Leaderboard,
    SolutionIndexResponse, StatRecord,
};
use super::{ApiError, Endpoint, GameApi, SolutionId};
use crate::config::ClientConfig;
use crate::core::{CheckResult, Feedback, Guess, Mode};
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// HTTP client for the game service
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: String,
}

impl HttpApi {
    /// Create a client for the service named by a validated config
    ///
    /// The config's timeout bounds every request; `None` waits indefinitely.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base: config.server.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base, endpoint.path())
    }

    async fn fetch<T: DeserializeOwned>(
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Http { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Http { endpoint, source })
    }
}

impl GameApi for HttpApi {
    async fn solution_index(&self) -> Result<SolutionId, ApiError> {
        let endpoint = Endpoint::SolutionIndex;
        let resp: SolutionIndexResponse =
            Self::fetch(endpoint, self.client.get(self.url(endpoint))).await?;
        debug!("solution index {}", resp.index);
        Ok(resp.index)
    }

    async fn check_guess(
        &self,
        solution: SolutionId,
        guess: &Guess,
    ) -> Result<CheckResult, ApiError> {
        let endpoint = Endpoint::CheckGuess;
        let request = self
            .client
            .post(self.url(endpoint))
            .query(&[("index", solution.to_string()), ("guess", guess.to_string())]);
        let resp: CheckGuessResponse = Self::fetch(endpoint, request).await?;
        debug!("check {guess} against {solution}: {}", resp.feedback);

        CheckResult::parse(&resp.feedback).map_err(|e| ApiError::Malformed {
            endpoint,
            reason: e.to_string(),
        })
    }

    async fn generate_guess(
        &self,
        mode: &Mode,
        guesses: &[Guess],
        feedback: &[Feedback],
    ) -> Result<Guess, ApiError> {
        let endpoint = Endpoint::GenerateGuess;
        let body = GenerateGuessRequest {
            mode,
            current_guesses: guesses,
            guess_feedback: feedback,
        };
        let request = self.client.post(self.url(endpoint)).json(&body);
        let resp: GenerateGuessResponse = Self::fetch(endpoint, request).await?;
        debug!("{mode} generated {:?}", resp.guess);

        Guess::parse(&resp.guess).map_err(|e| ApiError::Malformed {
            endpoint,
            reason: format!("guess {:?}: {e}", resp.guess),
        })
    }

    async fn insert_stat(&self, record: &StatRecord) -> Result<Leaderboard, ApiError> {
        let endpoint = Endpoint::InsertStat;
        let request = self.client.post(self.url(endpoint)).query(&record.query());
        let board: Leaderboard = Self::fetch(endpoint, request).await?;
        debug!("stats updated for {} modes", board.modes.len());
        Ok(board)
    }
}
