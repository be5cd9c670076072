//! Simple interactive CLI mode
//!
//! Line-based manual play without the TUI

use crate::api::GameApi;
use crate::core::{Mode, NUM_GUESSES};
use crate::game::{Controller, ControllerError, Status, SubmitOutcome};
use crate::output::formatters::outcome_message;
use crate::output::{print_board, print_leaderboard};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimpleError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// Line-mode command parsed from one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewGame,
    Stats,
    Guess(String),
    Empty,
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Self::Empty,
            "quit" | "exit" | ":q" => Self::Quit,
            "new" | ":n" => Self::NewGame,
            "stats" => Self::Stats,
            _ => Self::Guess(trimmed.to_string()),
        }
    }
}

/// Play manually, reading one guess or command per line from `input`
///
/// Returns when `input` is exhausted or `quit` is entered.
///
/// # Errors
///
/// Returns an error if reading `input` fails, or if the controller refuses
/// a guess for a reason other than a transient service failure.
pub async fn run_simple<A: GameApi, R: BufRead>(
    controller: &mut Controller<A>,
    mut input: R,
) -> Result<(), SimpleError> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Wordle - Simple Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Type a five-letter word and press Enter.");
    println!("Commands: 'new' for a new game, 'stats' for the leaderboard, 'quit' to exit\n");

    if !controller.set_mode(Mode::User) {
        controller.reset();
    }

    let mut line = String::new();
    loop {
        prompt(controller.state().guess_count() + 1)?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            Command::NewGame => {
                controller.reset();
                println!("\n🔄 New game started!\n");
            }
            Command::Stats => match controller.leaderboard() {
                Some(board) => print_leaderboard(&board, controller.mode().name()),
                None => println!("No stats yet; finish a game first.\n"),
            },
            Command::Guess(word) => match controller.submit_user_guess(&word).await {
                Ok(outcome) => show_outcome(controller, &outcome),
                Err(e) if e.is_retryable() => {
                    println!("{} {e}; try again\n", "⚠️".yellow());
                }
                Err(e) => return Err(e.into()),
            },
        }
    }
}

fn show_outcome<A: GameApi>(controller: &Controller<A>, outcome: &SubmitOutcome) {
    if let SubmitOutcome::Accepted(_) | SubmitOutcome::Solved(_) = outcome {
        println!();
        print_board(controller.state());
        println!();
    }

    if let Some(message) = outcome_message(outcome) {
        let styled = match outcome {
            SubmitOutcome::Solved(_) | SubmitOutcome::AlreadySolved => message.green().bold(),
            _ => message.red().bold(),
        };
        println!("{styled}");
    }

    match controller.state().status() {
        Status::Won if matches!(outcome, SubmitOutcome::Solved(_)) => {
            let n = controller.state().guess_count();
            println!(
                "🎉 Solved in {} {}! Type 'new' to play again.\n",
                n.to_string().bright_cyan().bold(),
                if n == 1 { "guess" } else { "guesses" }
            );
        }
        Status::Exhausted if matches!(outcome, SubmitOutcome::Accepted(_)) => {
            println!(
                "❌ No more guesses ({NUM_GUESSES}/{NUM_GUESSES}). Type 'new' to play again.\n"
            );
        }
        _ => {}
    }
}

fn prompt(turn: usize) -> io::Result<()> {
    if turn <= NUM_GUESSES {
        print!("Guess {turn}/{NUM_GUESSES}: ");
    } else {
        print!("> ");
    }
    io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("  QUIT \n"), Command::Quit);
        assert_eq!(Command::parse("new"), Command::NewGame);
        assert_eq!(Command::parse("stats"), Command::Stats);
        assert_eq!(Command::parse("\n"), Command::Empty);
    }

    #[test]
    fn anything_else_is_a_guess() {
        assert_eq!(Command::parse("crane\n"), Command::Guess("crane".to_string()));
        assert_eq!(Command::parse("newer"), Command::Guess("newer".to_string()));
    }
}
