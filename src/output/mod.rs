//! Terminal output formatting
//!
//! Board view model plus display utilities for line-mode output.

pub mod board;
pub mod display;
pub mod formatters;

pub use display::{print_banner, print_board, print_leaderboard, print_simulation_report};
