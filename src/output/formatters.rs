//! Formatting utilities for terminal output

use super::board::{Cell, CellClass};
use crate::core::{Feedback, Verdict};
use crate::game::SubmitOutcome;
use colored::{ColoredString, Colorize};

pub const MSG_INVALID: &str = "INVALID";
pub const MSG_MAX_GUESSES: &str = "MAX GUESSES REACHED";
pub const MSG_SOLVED: &str = "CORRECTLY GUESSED";

/// Status line shown after a typed guess, if any
#[must_use]
pub const fn outcome_message(outcome: &SubmitOutcome) -> Option<&'static str> {
    match outcome {
        SubmitOutcome::Accepted(_) => None,
        SubmitOutcome::Solved(_) | SubmitOutcome::AlreadySolved => Some(MSG_SOLVED),
        SubmitOutcome::Invalid => Some(MSG_INVALID),
        SubmitOutcome::MaxGuessesReached => Some(MSG_MAX_GUESSES),
    }
}

/// Format feedback as an emoji string
#[must_use]
pub fn feedback_to_emoji(feedback: &Feedback) -> String {
    feedback
        .verdicts()
        .iter()
        .map(|v| match v {
            Verdict::Correct => '🟩',
            Verdict::Misplaced => '🟨',
            Verdict::Wrong => '⬜',
        })
        .collect()
}

/// Render one board cell as a colored tile like ` C `
#[must_use]
pub fn cell_tile(cell: &Cell) -> ColoredString {
    let text = format!(" {} ", cell.letter.unwrap_or('·'));
    match cell.class {
        CellClass::Empty => text.bright_black(),
        CellClass::Correct => text.black().on_green().bold(),
        CellClass::Misplaced => text.black().on_yellow().bold(),
        CellClass::Wrong => text.white().on_bright_black(),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
