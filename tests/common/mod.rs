//! Scripted in-memory game service shared by the integration tests

#![allow(dead_code)]

use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use wordle_client::api::{
    ApiError, Endpoint, GameApi, Leaderboard, ModeStats, SolutionId, StatRecord,
};
use wordle_client::core::{CheckResult, Feedback, Guess, Mode};

/// One request the service received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SolutionIndex,
    CheckGuess {
        index: i64,
        guess: String,
    },
    GenerateGuess {
        mode: String,
        guesses: Vec<String>,
        feedback: Vec<String>,
    },
    InsertStat(StatRecord),
}

/// Scripted reply; `None` is a 500 from the service
type Reply<T> = Option<T>;

#[derive(Default)]
struct Script {
    solutions: VecDeque<(Reply<i64>, Duration)>,
    next_solution: i64,
    checks: VecDeque<Reply<String>>,
    generated: VecDeque<Reply<String>>,
    stats: Vec<StatRecord>,
    stat_delays: VecDeque<Duration>,
    stat_failures: usize,
    calls: Vec<Call>,
}

/// Game service whose replies are queued by the test
///
/// Unscripted calls get defaults: solution ids count up from 1, checks answer
/// `WWWWW`, strategies generate `CRANE`, stats replies are immediate.
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<Script>,
}

fn server_error(endpoint: Endpoint) -> ApiError {
    ApiError::Status {
        endpoint,
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn solution(self, id: i64) -> Self {
        self.delayed_solution(id, Duration::ZERO)
    }

    pub fn delayed_solution(self, id: i64, delay: Duration) -> Self {
        self.script().solutions.push_back((Some(id), delay));
        self
    }

    pub fn failing_solution(self) -> Self {
        self.script().solutions.push_back((None, Duration::ZERO));
        self
    }

    pub fn checks(self, replies: &[&str]) -> Self {
        self.script()
            .checks
            .extend(replies.iter().map(|r| Some((*r).to_string())));
        self
    }

    pub fn failing_check(self) -> Self {
        self.script().checks.push_back(None);
        self
    }

    pub fn generates(self, guesses: &[&str]) -> Self {
        self.script()
            .generated
            .extend(guesses.iter().map(|g| Some((*g).to_string())));
        self
    }

    pub fn failing_generation(self) -> Self {
        self.script().generated.push_back(None);
        self
    }

    /// Hold back the reply to the next stats report; the report is stored at once
    pub fn delayed_stats(self, delay: Duration) -> Self {
        self.script().stat_delays.push_back(delay);
        self
    }

    pub fn failing_stats(self, count: usize) -> Self {
        self.script().stat_failures = count;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    pub fn check_calls(&self) -> Vec<(i64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CheckGuess { index, guess } => Some((index, guess)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.script().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn stats(&self) -> Vec<StatRecord> {
        self.script().stats.clone()
    }

    fn leaderboard(stats: &[StatRecord]) -> Leaderboard {
        let mut modes: Vec<String> = stats.iter().map(|s| s.mode.name().to_string()).collect();
        modes.sort();
        modes.dedup();

        let modes = modes
            .into_iter()
            .map(|mode| {
                let games: Vec<&StatRecord> =
                    stats.iter().filter(|s| s.mode.name() == mode).collect();
                let n = games.len() as f64;
                ModeStats {
                    win_rate: games.iter().filter(|s| s.win).count() as f64 / n,
                    avg_guesses: games.iter().map(|s| s.num_guesses as f64).sum::<f64>() / n,
                    mode,
                }
            })
            .collect();
        Leaderboard { modes }
    }
}

impl GameApi for ScriptedApi {
    async fn solution_index(&self) -> Result<SolutionId, ApiError> {
        let (reply, delay) = {
            let mut script = self.script();
            script.calls.push(Call::SolutionIndex);
            script.next_solution += 1;
            let fallback = script.next_solution;
            script
                .solutions
                .pop_front()
                .unwrap_or((Some(fallback), Duration::ZERO))
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
            .map(SolutionId)
            .ok_or_else(|| server_error(Endpoint::SolutionIndex))
    }

    async fn check_guess(
        &self,
        solution: SolutionId,
        guess: &Guess,
    ) -> Result<CheckResult, ApiError> {
        let reply = {
            let mut script = self.script();
            script.calls.push(Call::CheckGuess {
                index: solution.0,
                guess: guess.to_string(),
            });
            script
                .checks
                .pop_front()
                .unwrap_or_else(|| Some("WWWWW".to_string()))
        };

        let feedback = reply.ok_or_else(|| server_error(Endpoint::CheckGuess))?;
        CheckResult::parse(&feedback).map_err(|e| ApiError::Malformed {
            endpoint: Endpoint::CheckGuess,
            reason: e.to_string(),
        })
    }

    async fn generate_guess(
        &self,
        mode: &Mode,
        guesses: &[Guess],
        feedback: &[Feedback],
    ) -> Result<Guess, ApiError> {
        let reply = {
            let mut script = self.script();
            script.calls.push(Call::GenerateGuess {
                mode: mode.name().to_string(),
                guesses: guesses.iter().map(ToString::to_string).collect(),
                feedback: feedback.iter().map(ToString::to_string).collect(),
            });
            script
                .generated
                .pop_front()
                .unwrap_or_else(|| Some("CRANE".to_string()))
        };

        let guess = reply.ok_or_else(|| server_error(Endpoint::GenerateGuess))?;
        Guess::parse(&guess).map_err(|e| ApiError::Malformed {
            endpoint: Endpoint::GenerateGuess,
            reason: e.to_string(),
        })
    }

    async fn insert_stat(&self, record: &StatRecord) -> Result<Leaderboard, ApiError> {
        let (reply, delay) = {
            let mut script = self.script();
            script.calls.push(Call::InsertStat(record.clone()));
            let delay = script.stat_delays.pop_front().unwrap_or_default();
            if script.stat_failures > 0 {
                script.stat_failures -= 1;
                (Err(server_error(Endpoint::InsertStat)), delay)
            } else {
                script.stats.push(record.clone());
                (Ok(Self::leaderboard(&script.stats)), delay)
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}
