//! Display functions for command results

use super::board::board;
use super::formatters::{cell_tile, create_progress_bar};
use crate::api::Leaderboard;
use crate::commands::SimulationReport;
use crate::game::GameState;
use colored::Colorize;

/// Print a boxed section title
pub fn print_banner(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

/// Print the played rows of the board, one tile per letter
pub fn print_board(state: &GameState) {
    for row in board(state).iter().take(state.guess_count()) {
        let tiles: Vec<String> = row.iter().map(|cell| cell_tile(cell).to_string()).collect();
        println!("   {}", tiles.join(" "));
    }
}

/// Print per-mode statistics, highlighting `current`
pub fn print_leaderboard(leaderboard: &Leaderboard, current: &str) {
    println!("\n🏆 {}", "Leaderboard:".bright_cyan().bold());
    if leaderboard.modes.is_empty() {
        println!("   {}", "No games recorded yet".bright_black());
        return;
    }

    println!(
        "   {:<24} {:>8} {:>12}",
        "Mode".bold(),
        "Win rate".bold(),
        "Avg guesses".bold()
    );
    for stats in &leaderboard.modes {
        let line = format!(
            "   {:<24} {:>7.0}% {:>12.2}",
            stats.mode,
            stats.win_rate * 100.0,
            stats.avg_guesses
        );
        if stats.mode == current {
            println!("{}", line.bright_yellow().bold());
        } else {
            println!("{line}");
        }
    }
}

/// Print the result of a simulation run
pub fn print_simulation_report(report: &SimulationReport) {
    print_banner(&format!("SIMULATION RESULTS: {}", report.mode));

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", report.games);
    println!(
        "   Won:              {}",
        format!("{} ({:.1}%)", report.wins, report.win_rate() * 100.0).green()
    );
    println!(
        "   Out of guesses:   {}",
        report.exhausted.to_string().yellow()
    );
    if report.aborted > 0 {
        println!("   Abandoned:        {}", report.aborted.to_string().red());
    }
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", report.average_guesses)
            .bright_yellow()
            .bold()
    );
    if report.wins > 0 {
        println!(
            "   Best case:        {}",
            report.min_guesses.to_string().green()
        );
        println!(
            "   Worst case:       {}",
            report.max_guesses.to_string().yellow()
        );
    }
    println!("   Time taken:       {:.2}s", report.duration.as_secs_f64());

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (guesses, count) in report.histogram() {
        let pct = if report.games > 0 {
            count as f64 / report.games as f64 * 100.0
        } else {
            0.0
        };
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {guesses}: {} {count:4} ({pct:5.1}%)", bar.green());
    }

    if let Some(reason) = &report.first_abort {
        println!("\n⚠️  First abandoned game: {}", reason.red());
    }
}
