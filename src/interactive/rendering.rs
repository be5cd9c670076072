//! TUI rendering with ratatui
//!
//! Draws the game board, mode selector, leaderboard and messages.

use super::app::{Message, MessageStyle};
use crate::api::Leaderboard;
use crate::core::{Mode, NUM_GUESSES};
use crate::game::{GameState, Solution};
use crate::output::board::{Cell, CellClass, board};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

/// Everything one frame shows
pub struct View<'a> {
    pub state: &'a GameState,
    /// `None` while auto-play drives the screen
    pub solution: Option<Solution>,
    pub modes: &'a [Mode],
    pub selected: usize,
    pub input: &'a str,
    pub messages: &'a [Message],
    pub leaderboard: Option<&'a Leaderboard>,
    pub auto_games: usize,
    /// `(game, of)` while auto-playing
    pub progress: Option<(usize, usize)>,
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(15),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Board
            Constraint::Percentage(60), // Side panels
        ])
        .split(chunks[1]);

    render_board(f, view, main_chunks[0]);
    render_side_panel(f, view, main_chunks[1]);
    render_input(f, view, chunks[2]);
    render_status(f, view, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🎯 WORDLE")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

/// Style for a board tile
#[must_use]
pub fn cell_style(class: CellClass) -> Style {
    match class {
        CellClass::Empty => Style::default().fg(Color::DarkGray),
        CellClass::Correct => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        CellClass::Misplaced => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        CellClass::Wrong => Style::default().fg(Color::White).bg(Color::DarkGray),
    }
}

fn tile(cell: &Cell) -> Span<'static> {
    Span::styled(
        format!(" {} ", cell.letter.unwrap_or('·')),
        cell_style(cell.class),
    )
}

fn render_board(f: &mut Frame, view: &View, area: Rect) {
    let mut lines = Vec::with_capacity(NUM_GUESSES * 2);
    for row in board(view.state) {
        lines.push(Line::from(row.iter().map(tile).collect::<Vec<_>>()));
        lines.push(Line::default());
    }

    let title = format!(" Game {} ", view.state.generation());
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_side_panel(f: &mut Frame, view: &View, area: Rect) {
    let mode_rows = view.modes.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(mode_rows), // Modes
            Constraint::Min(4),            // Leaderboard
            Constraint::Length(7),         // Messages
        ])
        .split(area);

    render_modes(f, view, chunks[0]);
    render_leaderboard(f, view, chunks[1]);
    render_messages(f, view, chunks[2]);
}

fn render_modes(f: &mut Frame, view: &View, area: Rect) {
    let items: Vec<ListItem> = view
        .modes
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            if i == view.selected {
                ListItem::new(format!("▶ {mode}")).style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(format!("  {mode}"))
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Mode (Tab) ")
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn render_leaderboard(f: &mut Frame, view: &View, area: Rect) {
    let current = view.state.mode().name();
    let lines: Vec<Line> = match view.leaderboard {
        Some(board) if !board.modes.is_empty() => board
            .modes
            .iter()
            .map(|stats| {
                let style = if stats.mode == current {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::styled(
                    format!(
                        "{:<24} {:>5.0}%  {:>5.2} guesses",
                        stats.mode,
                        stats.win_rate * 100.0,
                        stats.avg_guesses
                    ),
                    style,
                )
            })
            .collect(),
        _ => vec![Line::styled(
            "Finish a game to see stats",
            Style::default().fg(Color::DarkGray),
        )],
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Leaderboard ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, view: &View, area: Rect) {
    let messages: Vec<ListItem> = view
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, view: &View, area: Rect) {
    let (title, content, color) = if let Some((game, of)) = view.progress {
        (
            format!(" Auto-playing game {game}/{of} "),
            String::new(),
            Color::Magenta,
        )
    } else if view.state.mode().is_user() {
        (
            " Your guess | Enter to submit ".to_string(),
            view.input.to_string(),
            Color::Yellow,
        )
    } else {
        (
            format!(" {} | s: auto-play {} games ", view.state.mode(), view.auto_games),
            String::new(),
            Color::Cyan,
        )
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, view: &View, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let status_text = format!(
        "{} | {}/{NUM_GUESSES}",
        view.state.status(),
        view.state.guess_count()
    );
    f.render_widget(
        Paragraph::new(status_text).alignment(Alignment::Center),
        chunks[0],
    );

    let solution_text = match view.solution {
        Some(Solution::Ready(_)) => "Solution: ready",
        Some(Solution::Pending) => "Solution: loading",
        Some(Solution::Unavailable) => "Solution: unavailable",
        None => "",
    };
    f.render_widget(
        Paragraph::new(solution_text).alignment(Alignment::Center),
        chunks[1],
    );

    let help_text = if view.state.mode().is_user() {
        "Esc: Quit | Ctrl-N: New Game | Tab: Mode | Enter: Submit"
    } else {
        "q: Quit | n: New Game | Tab: Mode | s: Auto-play | +/-: Games"
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
