//! Simulate command
//!
//! Auto-plays a batch of games with one service-side strategy and summarizes
//! how it did.

use crate::api::GameApi;
use crate::core::NUM_GUESSES;
use crate::game::{Controller, ControllerError, GameOutcome, GameState, PlayObserver};
use indicatif::{ProgressBar, ProgressStyle};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Summary of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub mode: String,
    pub games: usize,
    pub wins: usize,
    pub exhausted: usize,
    pub aborted: usize,
    /// Guesses taken per won game
    pub distribution: FxHashMap<usize, usize>,
    /// Average over won games; 0 when nothing was won
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    /// Reason the first abandoned game stopped
    pub first_abort: Option<String>,
    pub duration: Duration,
}

impl SimulationReport {
    #[must_use]
    pub fn from_outcomes(mode: &str, outcomes: &[GameOutcome], duration: Duration) -> Self {
        let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();
        let mut exhausted = 0;
        let mut aborted = 0;
        let mut first_abort = None;

        for outcome in outcomes {
            match outcome {
                GameOutcome::Won { guesses } => *distribution.entry(*guesses).or_insert(0) += 1,
                GameOutcome::Exhausted => exhausted += 1,
                GameOutcome::Aborted { stage, detail } => {
                    aborted += 1;
                    first_abort.get_or_insert_with(|| format!("{stage}: {detail}"));
                }
            }
        }

        let wins: usize = distribution.values().sum();
        let total_guesses: usize = distribution.iter().map(|(g, n)| g * n).sum();
        let average_guesses = if wins > 0 {
            total_guesses as f64 / wins as f64
        } else {
            0.0
        };

        Self {
            mode: mode.to_string(),
            games: outcomes.len(),
            wins,
            exhausted,
            aborted,
            min_guesses: distribution.keys().copied().min().unwrap_or(0),
            max_guesses: distribution.keys().copied().max().unwrap_or(0),
            distribution,
            average_guesses,
            first_abort,
            duration,
        }
    }

    /// Fraction of completed (not abandoned) games that were won
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let completed = self.wins + self.exhausted;
        if completed == 0 {
            0.0
        } else {
            self.wins as f64 / completed as f64
        }
    }

    /// Won games per guess count, `1..=NUM_GUESSES`
    pub fn histogram(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..=NUM_GUESSES).map(|g| (g, self.distribution.get(&g).copied().unwrap_or(0)))
    }
}

/// Progress bar driven by auto-play events
pub struct ProgressObserver {
    bar: ProgressBar,
    wins: usize,
    finished: usize,
}

impl ProgressObserver {
    #[must_use]
    pub fn new(games: usize) -> Self {
        let bar = ProgressBar::new(games as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓▒░"));
        bar.set_style(style);
        Self {
            bar,
            wins: 0,
            finished: 0,
        }
    }

    /// Observer that draws nothing, for non-terminal output
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            wins: 0,
            finished: 0,
        }
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Complete!");
    }
}

impl PlayObserver for ProgressObserver {
    fn game_started(&mut self, game: usize, _state: &GameState) {
        self.bar.set_message(format!("game {}", game + 1));
    }

    fn game_finished(&mut self, _game: usize, _state: &GameState, outcome: &GameOutcome) {
        self.finished += 1;
        if matches!(outcome, GameOutcome::Won { .. }) {
            self.wins += 1;
        }
        self.bar
            .set_message(format!("won {}/{}", self.wins, self.finished));
        self.bar.inc(1);
    }
}

/// Auto-play `games` games in the controller's current mode
///
/// Waits for the outcome reports to reach the service before returning, so the
/// controller's leaderboard reflects the whole run.
///
/// # Errors
/// Returns `ControllerError::UserMode` if the controller is in user mode.
pub async fn run_simulation<A: GameApi>(
    controller: &mut Controller<A>,
    games: usize,
    show_progress: bool,
) -> Result<SimulationReport, ControllerError> {
    let mut observer = if show_progress {
        ProgressObserver::new(games)
    } else {
        ProgressObserver::hidden()
    };

    let start = Instant::now();
    let outcomes = controller.auto_play(games, &mut observer).await?;
    observer.finish();
    controller.finish().await;

    Ok(SimulationReport::from_outcomes(
        controller.mode().name(),
        &outcomes,
        start.elapsed(),
    ))
}
