// safelog/src/main.rs
//! safelog entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use safelog::cli::{Cli, Commands};
use safelog::commands::scan::run_scan;
use safelog::commands::scrub::{run_scrub, ScrubOptions};
use safelog::logger;
use safelog::ui::messages::{error_msg, warn_msg};
use safelog_core::SafelogConfig;

fn run(cli: Cli) -> Result<()> {
    let config = SafelogConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match &cli.command {
        Commands::Scrub(cmd) => {
            let opts = ScrubOptions::resolve(cmd, &config, cli.quiet);
            let report = run_scrub(&opts)?;
            if report.dropped_tail_bytes > 0 && !cli.quiet {
                warn_msg(format!(
                    "Dropped {} bytes after the last newline (--no-finish).",
                    report.dropped_tail_bytes
                ));
            }
        }
        Commands::Scan(cmd) => {
            run_scan(cmd)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error_msg(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
