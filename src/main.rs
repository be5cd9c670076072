//! Wordle Client - CLI
//!
//! Play Wordle against a remote game service, manually or with one of its
//! strategies, in a TUI or on the command line.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use log::info;
use std::io;
use std::path::PathBuf;
use wordle_client::{
    api::HttpApi,
    commands::{run_simple, run_simulation},
    config::{ClientConfig, DEFAULT_SERVER_URL, SERVER_URL_ENV},
    core::Mode,
    game::Controller,
    interactive::{App, run_tui},
    logging,
    output::{print_leaderboard, print_simulation_report},
};

#[derive(Parser)]
#[command(
    name = "wordle_client",
    about = "Play Wordle against a remote game service, by hand or with its strategies",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the game service
    #[arg(short = 'S', long, global = true, env = SERVER_URL_ENV, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,

    /// Strategy modes offered in the TUI, comma separated
    #[arg(long, global = true, value_delimiter = ',')]
    strategies: Vec<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (manual play without TUI)
    Simple,

    /// Auto-play games with a service-side strategy and report the results
    Simulate {
        /// Strategy mode, e.g. entropy, letter_frequency, tfidf
        #[arg(short, long)]
        mode: String,

        /// Number of games to play
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ClientConfig::new(&cli.server, cli.timeout)?
        .with_strategies(cli.strategies)
        .with_logging(cli.log_file, cli.verbose);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);
    logging::init(&config, matches!(command, Commands::Play))?;
    info!("using game service at {}", config.server);

    let api = HttpApi::new(&config).context("cannot build HTTP client")?;

    match command {
        Commands::Play => run_play_command(api, &config).await,
        Commands::Simple => run_simple_command(api).await,
        Commands::Simulate { mode, count } => run_simulate_command(api, &mode, count).await,
    }
}

async fn run_play_command(api: HttpApi, config: &ClientConfig) -> Result<()> {
    let controller = Controller::new(api, Mode::User);
    let mut app = App::new(controller, config.modes());

    let res = run_tui(&mut app).await;
    app.controller.finish().await;
    res
}

async fn run_simple_command(api: HttpApi) -> Result<()> {
    let mut controller = Controller::new(api, Mode::User);

    let res = run_simple(&mut controller, io::stdin().lock()).await;
    controller.finish().await;
    Ok(res?)
}

async fn run_simulate_command(api: HttpApi, mode: &str, count: usize) -> Result<()> {
    let mode = match Mode::strategy(mode) {
        Ok(mode) => mode,
        Err(e) => bail!(
            "simulate needs a strategy mode ({e}), one of: {}",
            Mode::KNOWN_STRATEGIES.join(", ")
        ),
    };

    println!("🎯 Playing {count} games in {mode} mode...");
    let mut controller = Controller::new(api, mode);
    let report = run_simulation(&mut controller, count, true).await?;

    print_simulation_report(&report);
    match controller.leaderboard() {
        Some(board) => print_leaderboard(&board, &report.mode),
        None => println!("\nNo stats were recorded by the service."),
    }
    Ok(())
}
