//! Board view model
//!
//! Maps the game state onto a fixed `NUM_GUESSES × WORD_LENGTH` grid of cells.
//! Every presentation layer draws from this grid.

use crate::core::{NUM_GUESSES, Verdict, WORD_LENGTH};
use crate::game::GameState;

/// Visual class of a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Empty,
    Correct,
    Misplaced,
    Wrong,
}

impl From<Verdict> for CellClass {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Correct => Self::Correct,
            Verdict::Misplaced => Self::Misplaced,
            Verdict::Wrong => Self::Wrong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<char>,
    pub class: CellClass,
}

impl Cell {
    pub const EMPTY: Self = Self {
        letter: None,
        class: CellClass::Empty,
    };
}

pub type Row = [Cell; WORD_LENGTH];

/// Full board for the given state; unplayed rows are empty
#[must_use]
pub fn board(state: &GameState) -> [Row; NUM_GUESSES] {
    let mut grid = [[Cell::EMPTY; WORD_LENGTH]; NUM_GUESSES];
    for (row, (guess, feedback)) in grid.iter_mut().zip(state.rows()) {
        for ((cell, letter), verdict) in row.iter_mut().zip(guess.letters()).zip(feedback.verdicts()) {
            *cell = Cell {
                letter: Some(letter),
                class: CellClass::from(*verdict),
            };
        }
    }
    grid
}
