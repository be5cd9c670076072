//! Game session controller
//!
//! Owns the active [`GameState`] and sequences calls to the game service:
//! resetting games, submitting typed guesses, and auto-playing games with a
//! service-side strategy.
//!
//! # Background work
//! `reset` never waits on the network. It publishes a pending solution ticket for
//! the new game and spawns a task that fills it in; when the previous game had
//! finished it also spawns a task reporting the outcome. Guess checks wait for the
//! ticket of the current game, so a guess can never be checked against the
//! solution of an earlier game.
//!
//! All methods that start background work must be called from within a Tokio
//! runtime.

use super::state::{GameState, StateError, Status};
use crate::api::{ApiError, GameApi, Leaderboard, SolutionId};
use crate::core::{CheckResult, Feedback, Guess, Mode};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Solution for one game, as known to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solution {
    /// Refresh still in flight
    Pending,
    Ready(SolutionId),
    /// Refresh failed; guesses for this game cannot be checked
    Unavailable,
}

/// Solution tagged with the game generation it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionTicket {
    pub generation: u64,
    pub solution: Solution,
}

/// Leaderboard tagged with the stats report that produced it
///
/// Reports are numbered from 1 in the order they are issued; 0 means no report
/// has succeeded yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardTicket {
    pub report: u64,
    pub board: Option<Leaderboard>,
}

/// Result of submitting a typed guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Recorded; the game continues or is now exhausted
    Accepted(Feedback),
    /// Recorded and all letters are correct
    Solved(Feedback),
    /// Not a recognized word; nothing recorded
    Invalid,
    /// Refused: six guesses already recorded
    MaxGuessesReached,
    /// Refused: the game is already won
    AlreadySolved,
}

/// Step at which an auto-played game was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortStage {
    /// The strategy could not produce a guess
    Generation,
    /// The generated guess could not be checked
    Check,
    /// The service rejected the generated guess as invalid
    Rejected,
}

impl fmt::Display for AbortStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Generation => "generation failed",
            Self::Check => "check failed",
            Self::Rejected => "guess rejected",
        })
    }
}

/// How an auto-played game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Won { guesses: usize },
    Exhausted,
    Aborted { stage: AbortStage, detail: String },
}

impl GameOutcome {
    fn aborted(stage: AbortStage, detail: impl fmt::Display) -> Self {
        Self::Aborted {
            stage,
            detail: detail.to_string(),
        }
    }
}

/// Errors surfaced by controller operations
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("guesses can only be typed in user mode (current mode: {0})")]
    NotUserMode(Mode),
    #[error("auto-play needs a strategy mode, not user")]
    UserMode,
    #[error("no solution is available for game {generation}")]
    SolutionUnavailable { generation: u64 },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    State(#[from] StateError),
}

impl ControllerError {
    /// Whether repeating the operation may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

/// Hooks for presentation layers following an auto-play run
pub trait PlayObserver {
    fn game_started(&mut self, _game: usize, _state: &GameState) {}
    fn guess_recorded(&mut self, _state: &GameState) {}
    fn game_finished(&mut self, _game: usize, _state: &GameState, _outcome: &GameOutcome) {}
}

impl PlayObserver for () {}

/// Single owner of the active game
pub struct Controller<A: GameApi> {
    api: Arc<A>,
    state: GameState,
    reported: bool,
    reports: u64,
    solution: Arc<watch::Sender<SolutionTicket>>,
    leaderboard: Arc<watch::Sender<LeaderboardTicket>>,
    tasks: JoinSet<()>,
}

impl<A: GameApi> Controller<A> {
    /// Create a controller with no active solution
    ///
    /// Call [`Controller::reset`] to start the first game.
    pub fn new(api: A, mode: Mode) -> Self {
        let (solution, _) = watch::channel(SolutionTicket {
            generation: 0,
            solution: Solution::Unavailable,
        });
        let (leaderboard, _) = watch::channel(LeaderboardTicket::default());

        Self {
            api: Arc::new(api),
            state: GameState::new(mode, 0),
            reported: false,
            reports: 0,
            solution: Arc::new(solution),
            leaderboard: Arc::new(leaderboard),
            tasks: JoinSet::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn mode(&self) -> &Mode {
        self.state.mode()
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Solution ticket currently published
    #[must_use]
    pub fn solution_ticket(&self) -> SolutionTicket {
        *self.solution.borrow()
    }

    /// Per-mode stats from the most recently issued report that succeeded
    #[must_use]
    pub fn leaderboard(&self) -> Option<Leaderboard> {
        self.leaderboard.borrow().board.clone()
    }

    /// Watch leaderboard updates as stat reports complete
    #[must_use]
    pub fn subscribe_leaderboard(&self) -> watch::Receiver<LeaderboardTicket> {
        self.leaderboard.subscribe()
    }

    /// Start a new game in the current mode
    ///
    /// If the game being replaced has finished, its outcome is reported in the
    /// background. The board is empty when this returns; the new solution arrives
    /// in the background.
    pub fn reset(&mut self) {
        let mode = self.state.mode().clone();
        self.start_game(mode);
    }

    /// Switch mode, starting a new game if the mode changed
    ///
    /// Returns whether a new game was started.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if &mode == self.state.mode() {
            return false;
        }
        self.start_game(mode);
        true
    }

    /// Submit a typed guess in user mode
    ///
    /// # Errors
    /// - `NotUserMode` when a strategy mode is active
    /// - `Api` / `SolutionUnavailable` when the guess could not be checked; nothing
    ///   is recorded and the call can be repeated
    pub async fn submit_user_guess(&mut self, raw: &str) -> Result<SubmitOutcome, ControllerError> {
        if !self.state.mode().is_user() {
            return Err(ControllerError::NotUserMode(self.state.mode().clone()));
        }

        // A full board is reported as such even when the last guess won
        match self.state.status() {
            Status::Exhausted => return Ok(SubmitOutcome::MaxGuessesReached),
            Status::Won if self.state.is_full() => return Ok(SubmitOutcome::MaxGuessesReached),
            Status::Won => return Ok(SubmitOutcome::AlreadySolved),
            Status::InProgress => {}
        }

        let Ok(guess) = Guess::parse(raw) else {
            debug!("rejecting malformed guess {raw:?}");
            return Ok(SubmitOutcome::Invalid);
        };

        let (token, result) = match self.check(&guess).await {
            Ok(checked) => checked,
            Err(e) => {
                warn!("guess {guess} was not checked: {e}");
                return Err(e);
            }
        };

        match result {
            CheckResult::Invalid => Ok(SubmitOutcome::Invalid),
            CheckResult::Valid(feedback) => {
                let status = self.state.record(token, guess, feedback)?;
                debug!(
                    "game {} row {}: {feedback}",
                    self.state.generation(),
                    self.state.guess_count()
                );
                if status == Status::Won {
                    Ok(SubmitOutcome::Solved(feedback))
                } else {
                    Ok(SubmitOutcome::Accepted(feedback))
                }
            }
        }
    }

    /// Play `num_games` games with the active strategy, one after another
    ///
    /// A game that cannot continue because of a service failure is abandoned with
    /// [`GameOutcome::Aborted`] and the run moves on to the next game.
    ///
    /// # Errors
    /// Returns `UserMode` if manual mode is active.
    pub async fn auto_play<O: PlayObserver + ?Sized>(
        &mut self,
        num_games: usize,
        observer: &mut O,
    ) -> Result<Vec<GameOutcome>, ControllerError> {
        if self.state.mode().is_user() {
            return Err(ControllerError::UserMode);
        }

        let mut outcomes = Vec::with_capacity(num_games);
        for game in 0..num_games {
            self.reset();
            observer.game_started(game, &self.state);

            let outcome = self.play_game(observer).await;
            match &outcome {
                GameOutcome::Aborted { stage, detail } => {
                    warn!("game {} abandoned, {stage}: {detail}", game + 1);
                }
                finished => info!("game {} finished: {finished:?}", game + 1),
            }

            observer.game_finished(game, &self.state, &outcome);
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Report the current game if it has finished, then wait for all background work
    pub async fn finish(&mut self) {
        self.report_finished_game();
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                warn!("background task failed: {e}");
            }
        }
    }

    async fn play_game<O: PlayObserver + ?Sized>(&mut self, observer: &mut O) -> GameOutcome {
        while self.state.status() == Status::InProgress {
            let generated = self
                .api
                .generate_guess(
                    self.state.mode(),
                    self.state.guesses(),
                    self.state.feedback(),
                )
                .await;
            let guess = match generated {
                Ok(guess) => guess,
                Err(e) => return GameOutcome::aborted(AbortStage::Generation, e),
            };

            let (token, feedback) = match self.check(&guess).await {
                Ok((token, CheckResult::Valid(feedback))) => (token, feedback),
                Ok((_, CheckResult::Invalid)) => {
                    return GameOutcome::aborted(
                        AbortStage::Rejected,
                        format!("service rejected generated guess {guess}"),
                    );
                }
                Err(e) => return GameOutcome::aborted(AbortStage::Check, e),
            };

            if let Err(e) = self.state.record(token, guess, feedback) {
                return GameOutcome::aborted(AbortStage::Check, e);
            }
            observer.guess_recorded(&self.state);
        }

        match self.state.status() {
            Status::Won => GameOutcome::Won {
                guesses: self.state.guess_count(),
            },
            _ => GameOutcome::Exhausted,
        }
    }

    /// Check a guess against the current game's solution
    ///
    /// Returns the generation the check was issued for alongside the result.
    async fn check(&self, guess: &Guess) -> Result<(u64, CheckResult), ControllerError> {
        let token = self.state.generation();
        let solution = self.current_solution().await?;
        let result = self.api.check_guess(solution, guess).await?;
        Ok((token, result))
    }

    async fn current_solution(&self) -> Result<SolutionId, ControllerError> {
        let generation = self.state.generation();
        let unavailable = ControllerError::SolutionUnavailable { generation };

        let mut rx = self.solution.subscribe();
        let ticket = match rx
            .wait_for(|t| t.generation != generation || t.solution != Solution::Pending)
            .await
        {
            Ok(ticket) => *ticket,
            Err(_) => return Err(unavailable),
        };

        match ticket {
            SolutionTicket {
                generation: g,
                solution: Solution::Ready(id),
            } if g == generation => Ok(id),
            _ => Err(unavailable),
        }
    }

    fn start_game(&mut self, mode: Mode) {
        self.reap_tasks();
        self.report_finished_game();

        let generation = self.state.generation() + 1;
        self.state = GameState::new(mode, generation);
        self.reported = false;
        self.solution.send_replace(SolutionTicket {
            generation,
            solution: Solution::Pending,
        });
        debug!("game {generation} started in {} mode", self.state.mode());

        let api = Arc::clone(&self.api);
        let tx = Arc::clone(&self.solution);
        self.tasks.spawn(async move {
            let solution = match api.solution_index().await {
                Ok(id) => Solution::Ready(id),
                Err(e) => {
                    warn!("no solution for game {generation}: {e}");
                    Solution::Unavailable
                }
            };
            // A newer game owns the ticket now; drop the late result
            tx.send_if_modified(|ticket| {
                if ticket.generation == generation {
                    ticket.solution = solution;
                    true
                } else {
                    false
                }
            });
        });
    }

    fn report_finished_game(&mut self) {
        if self.reported {
            return;
        }
        let Some(record) = self.state.stat_record() else {
            return;
        };
        self.reported = true;
        self.reports += 1;
        let report = self.reports;

        let api = Arc::clone(&self.api);
        let leaderboard = Arc::clone(&self.leaderboard);
        self.tasks.spawn(async move {
            match api.insert_stat(&record).await {
                // Responses can arrive out of order; keep the newest report's view
                Ok(board) => {
                    leaderboard.send_if_modified(|latest| {
                        if report > latest.report {
                            *latest = LeaderboardTicket {
                                report,
                                board: Some(board),
                            };
                            true
                        } else {
                            debug!("stats report {report} superseded by {}", latest.report);
                            false
                        }
                    });
                }
                Err(e) => warn!("could not report {} game: {e}", record.mode),
            }
        });
    }

    fn reap_tasks(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                warn!("background task failed: {e}");
            }
        }
    }
}
