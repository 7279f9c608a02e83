//! Command-line interface definition for the safelog application.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "safelog",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scrub IP addresses from log streams",
    long_about = "safelog sits between a log producer and its destination. It reassembles lines from a byte stream, replaces every IPv4 and IPv6 address (including ports, brackets, compressed and percent-encoded forms) with [scrubbed], and writes the result out line by line.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a YAML configuration file.
    #[arg(long = "config", value_name = "FILE", env = "SAFELOG_CONFIG", global = true, help = "Path to a YAML configuration file.")]
    pub config: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `safelog` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Streams input through the scrubber and writes the scrubbed lines.
    #[command(about = "Stream input through the address scrubber.")]
    Scrub(ScrubCommand),

    /// Counts addresses in the input without printing them.
    #[command(about = "Count the addresses an input would have scrubbed.")]
    Scan(ScanCommand),
}

/// Arguments for the `scrub` command.
#[derive(Parser, Debug)]
pub struct ScrubCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write scrubbed output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Append to the output file rather than truncating it.
    #[arg(long, help = "Append to the output file instead of truncating it.")]
    pub append: bool,

    /// Drop an unterminated final line instead of scrubbing and emitting it.
    #[arg(long = "no-finish", help = "Do not emit a final line that lacks a trailing newline.")]
    pub no_finish: bool,

    /// Force a line break once this many bytes are buffered without a newline.
    #[arg(long = "max-pending-bytes", value_name = "BYTES", value_parser = clap::value_parser!(u64).range(1..), help = "Force a line break after this many buffered bytes.")]
    pub max_pending_bytes: Option<u64>,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long, help = "Print the summary as JSON instead of a table.")]
    pub json: bool,
}
