//! Wordle Client
//!
//! A client for a remote Wordle game service. The service owns the word lists,
//! the feedback rules, the guess-generating strategies and the stats store; this
//! crate sequences calls to it and presents the games.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wordle_client::api::HttpApi;
//! use wordle_client::config::ClientConfig;
//! use wordle_client::core::Mode;
//! use wordle_client::game::Controller;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("http://127.0.0.1:5000/", None)?;
//! let api = HttpApi::new(&config)?;
//! let mut controller = Controller::new(api, Mode::User);
//!
//! controller.reset();
//! let outcome = controller.submit_user_guess("crane").await?;
//! println!("{outcome:?}");
//! controller.finish().await;
//! # Ok(())
//! # }
//! ```

// Core domain types
pub mod core;

// Game service access
pub mod api;

// Game state machine and session controller
pub mod game;

// Settings and logging
pub mod config;
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
