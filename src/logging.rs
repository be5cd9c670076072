//! Logging setup
//!
//! `RUST_LOG` always wins. Otherwise the level follows the `-v` count. The TUI
//! owns the terminal, so interactive sessions log nowhere unless a log file is
//! given or `RUST_LOG` asks for it.

use crate::config::ClientConfig;
use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::File;

/// Default filter for a given number of `-v` flags
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global logger
///
/// # Errors
/// Returns an error if the log file cannot be created.
pub fn init(config: &ClientConfig, interactive: bool) -> Result<()> {
    let default_filter = if interactive && config.log_file.is_none() {
        "off"
    } else {
        level_for(config.verbosity)
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // Tests and embedders may have installed a logger already
    let _ = builder.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }
}
