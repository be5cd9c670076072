//! TUI application state and logic

use super::rendering::{View, ui};
use crate::api::{GameApi, Leaderboard};
use crate::commands::SimulationReport;
use crate::core::{Mode, WORD_LENGTH};
use crate::game::{Controller, GameOutcome, GameState, PlayObserver, Status, SubmitOutcome};
use crate::output::formatters::{MSG_SOLVED, feedback_to_emoji, outcome_message};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Games played per auto-play run unless adjusted
pub const DEFAULT_AUTO_GAMES: usize = 10;
const MAX_AUTO_GAMES: usize = 1000;
const MAX_MESSAGES: usize = 5;

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Follow-up work a key press asks the event loop for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    AutoPlay,
}

/// Application state
pub struct App<A: GameApi> {
    pub controller: Controller<A>,
    pub modes: Vec<Mode>,
    pub selected: usize,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub auto_games: usize,
    pub should_quit: bool,
}

impl<A: GameApi> App<A> {
    /// Wrap a controller and start the first game
    ///
    /// The controller's mode is selected if it is among `modes`; otherwise the
    /// first mode is.
    pub fn new(mut controller: Controller<A>, mut modes: Vec<Mode>) -> Self {
        if modes.is_empty() {
            modes.push(Mode::User);
        }
        let selected = modes
            .iter()
            .position(|m| m == controller.mode())
            .unwrap_or(0);
        if !controller.set_mode(modes[selected].clone()) {
            controller.reset();
        }

        let mut app = Self {
            controller,
            modes,
            selected,
            input_buffer: String::new(),
            messages: Vec::new(),
            auto_games: DEFAULT_AUTO_GAMES,
            should_quit: false,
        };
        app.greet();
        app
    }

    /// Build a view of the current state for rendering
    #[must_use]
    pub fn view<'a>(&'a self, leaderboard: Option<&'a Leaderboard>) -> View<'a> {
        View {
            state: self.controller.state(),
            solution: Some(self.controller.solution_ticket().solution),
            modes: &self.modes,
            selected: self.selected,
            input: &self.input_buffer,
            messages: &self.messages,
            leaderboard,
            auto_games: self.auto_games,
            progress: None,
        }
    }

    /// Apply one key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let typing = self.controller.mode().is_user();

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('n') if ctrl => self.new_game(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Tab => self.cycle_mode(),
            KeyCode::Backspace if typing => {
                self.input_buffer.pop();
            }
            KeyCode::Enter if typing => self.submit().await,
            KeyCode::Char(c) if typing => self.push_letter(c),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Char('s') | KeyCode::Enter => return Action::AutoPlay,
            KeyCode::Char('+' | '=') => self.adjust_auto_games(1),
            KeyCode::Char('-') => self.adjust_auto_games(-1),
            _ => {}
        }
        Action::None
    }

    pub fn push_letter(&mut self, c: char) {
        if c.is_ascii_alphabetic() && self.input_buffer.len() < WORD_LENGTH {
            self.input_buffer.push(c.to_ascii_uppercase());
        }
    }

    pub fn adjust_auto_games(&mut self, delta: isize) {
        self.auto_games = self
            .auto_games
            .saturating_add_signed(delta)
            .clamp(1, MAX_AUTO_GAMES);
    }

    pub fn new_game(&mut self) {
        self.controller.reset();
        self.input_buffer.clear();
        self.messages.clear();
        self.add_message("New game started!", MessageStyle::Info);
    }

    /// Select the next mode, starting a new game in it
    pub fn cycle_mode(&mut self) {
        self.selected = (self.selected + 1) % self.modes.len();
        let mode = self.modes[self.selected].clone();
        self.controller.set_mode(mode);
        self.input_buffer.clear();
        self.messages.clear();
        self.greet();
    }

    /// Submit the typed guess
    ///
    /// The input line is kept when the check failed for a transient reason so it
    /// can be resubmitted.
    pub async fn submit(&mut self) {
        let input = self.input_buffer.clone();
        match self.controller.submit_user_guess(&input).await {
            Ok(outcome) => {
                self.input_buffer.clear();
                self.show_outcome(&input, &outcome);
            }
            Err(e) if e.is_retryable() => {
                self.add_message(&format!("{e}; press Enter to retry"), MessageStyle::Error);
            }
            Err(e) => {
                self.input_buffer.clear();
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
        }
    }

    /// Auto-play the selected number of games, redrawing after every guess
    ///
    /// # Errors
    /// Returns an error if drawing to the terminal fails.
    pub async fn auto_play<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if self.controller.mode().is_user() {
            self.add_message(
                "Auto-play needs a strategy mode; press Tab to pick one",
                MessageStyle::Error,
            );
            return Ok(());
        }

        let mut observer = TuiObserver {
            terminal,
            modes: self.modes.clone(),
            selected: self.selected,
            messages: self.messages.clone(),
            leaderboard: self.controller.leaderboard(),
            auto_games: self.auto_games,
            current: 0,
            error: None,
        };

        let start = Instant::now();
        let outcomes = match self.controller.auto_play(self.auto_games, &mut observer).await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return Ok(());
            }
        };
        if let Some(e) = observer.error.take() {
            return Err(e.into());
        }

        let report =
            SimulationReport::from_outcomes(self.controller.mode().name(), &outcomes, start.elapsed());
        self.show_report(&report);
        Ok(())
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    fn greet(&mut self) {
        let text = if self.controller.mode().is_user() {
            "Type a five-letter word and press Enter".to_string()
        } else {
            format!(
                "Mode {}: press s to auto-play, +/- to change the game count",
                self.controller.mode()
            )
        };
        self.add_message(&text, MessageStyle::Info);
    }

    fn show_outcome(&mut self, input: &str, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Accepted(feedback) => {
                self.add_message(
                    &format!("{input} {}", feedback_to_emoji(feedback)),
                    MessageStyle::Info,
                );
                if self.controller.state().status() == Status::Exhausted {
                    self.add_message(
                        "Out of guesses! Ctrl-N starts a new game",
                        MessageStyle::Error,
                    );
                }
            }
            SubmitOutcome::Solved(feedback) => {
                self.add_message(
                    &format!("{input} {}", feedback_to_emoji(feedback)),
                    MessageStyle::Info,
                );
                self.add_message(MSG_SOLVED, MessageStyle::Success);
            }
            other => {
                if let Some(text) = outcome_message(other) {
                    self.add_message(text, MessageStyle::Error);
                }
            }
        }
    }

    fn show_report(&mut self, report: &SimulationReport) {
        self.add_message(
            &format!(
                "{}: won {}/{} ({:.0}%), {:.2} guesses on average",
                report.mode,
                report.wins,
                report.games,
                report.win_rate() * 100.0,
                report.average_guesses
            ),
            MessageStyle::Success,
        );
        if let Some(reason) = &report.first_abort {
            self.add_message(
                &format!("{} game(s) abandoned: {reason}", report.aborted),
                MessageStyle::Error,
            );
        }
    }
}

/// Redraws the screen as auto-played games progress
struct TuiObserver<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    modes: Vec<Mode>,
    selected: usize,
    messages: Vec<Message>,
    leaderboard: Option<Leaderboard>,
    auto_games: usize,
    current: usize,
    error: Option<io::Error>,
}

impl<B: Backend> TuiObserver<'_, B> {
    fn draw(&mut self, state: &GameState) {
        if self.error.is_some() {
            return;
        }
        let view = View {
            state,
            solution: None,
            modes: &self.modes,
            selected: self.selected,
            input: "",
            messages: &self.messages,
            leaderboard: self.leaderboard.as_ref(),
            auto_games: self.auto_games,
            progress: Some((self.current + 1, self.auto_games)),
        };
        if let Err(e) = self.terminal.draw(|f| ui(f, &view)) {
            self.error = Some(e);
        }
    }
}

impl<B: Backend> PlayObserver for TuiObserver<'_, B> {
    fn game_started(&mut self, game: usize, state: &GameState) {
        self.current = game;
        self.draw(state);
    }

    fn guess_recorded(&mut self, state: &GameState) {
        self.draw(state);
    }

    fn game_finished(&mut self, game: usize, state: &GameState, outcome: &GameOutcome) {
        let text = match outcome {
            GameOutcome::Won { guesses } => format!("Game {}: solved in {guesses}", game + 1),
            GameOutcome::Exhausted => format!("Game {}: out of guesses", game + 1),
            GameOutcome::Aborted { stage, .. } => format!("Game {}: {stage}", game + 1),
        };
        let style = match outcome {
            GameOutcome::Won { .. } => MessageStyle::Success,
            _ => MessageStyle::Error,
        };
        self.messages.push(Message { text, style });
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
        self.draw(state);
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub async fn run_tui<A: GameApi>(app: &mut App<A>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        warn!("TUI stopped: {err}");
        eprintln!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: Backend, A: GameApi>(
    terminal: &mut Terminal<B>,
    app: &mut App<A>,
) -> Result<()> {
    loop {
        let leaderboard = app.controller.leaderboard();
        terminal.draw(|f| ui(f, &app.view(leaderboard.as_ref())))?;

        // Poll so background results (solution, leaderboard) show up without input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()?
                && app.handle_key(key).await == Action::AutoPlay
            {
                app.auto_play(terminal).await?;
            }
        } else {
            tokio::task::yield_now().await;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
