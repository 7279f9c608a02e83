//! `safelog scrub`: stream input through a `LogScrubber`.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use safelog_core::{LogScrubber, SafelogConfig, ScrubberConfig};

use crate::cli::ScrubCommand;
use crate::ui::messages::info_msg;

/// Fully resolved settings for one `scrub` run: CLI flags layered over the
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubOptions {
    pub input_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub append: bool,
    pub finish_on_eof: bool,
    pub scrubber: ScrubberConfig,
    pub quiet: bool,
}

impl ScrubOptions {
    pub fn resolve(cmd: &ScrubCommand, config: &SafelogConfig, quiet: bool) -> Self {
        let max_pending_bytes = cmd
            .max_pending_bytes
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .or(config.scrubber.max_pending_bytes);
        Self {
            input_file: cmd.input_file.clone(),
            output: cmd.output.clone().or_else(|| config.output.path.clone()),
            append: cmd.append || config.output.append,
            finish_on_eof: !cmd.no_finish && config.output.finish_on_eof,
            scrubber: ScrubberConfig { max_pending_bytes },
            quiet,
        }
    }
}

/// What happened to a stream once it was fully read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamReport {
    pub bytes_read: u64,
    /// Size of an unterminated final line that was not emitted.
    pub dropped_tail_bytes: usize,
}

/// Copies `reader` into `sink` through a scrubber, in whatever chunk sizes the
/// reader produces. With `finish` set, a final line without a newline is still
/// scrubbed and emitted; otherwise it is discarded and reported.
pub fn scrub_stream<R, W>(
    reader: &mut R,
    sink: W,
    config: &ScrubberConfig,
    finish: bool,
) -> io::Result<StreamReport>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut scrubber = LogScrubber::with_config(sink, config);
    let bytes_read = io::copy(reader, &mut scrubber)?;
    let dropped_tail_bytes = if finish {
        scrubber.finish()?;
        0
    } else {
        scrubber.flush()?;
        scrubber.pending().len()
    };
    Ok(StreamReport {
        bytes_read,
        dropped_tail_bytes,
    })
}

fn open_output(path: &Path, append: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options
        .open(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))
}

/// Runs the `scrub` command.
pub fn run_scrub(opts: &ScrubOptions) -> Result<StreamReport> {
    info!("Starting scrub operation.");

    let mut reader: Box<dyn Read> = match &opts.input_file {
        Some(path) => Box::new(
            File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let writer: Box<dyn Write> = match &opts.output {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing scrubbed output to file: {}", path.display()));
            }
            Box::new(BufWriter::new(open_output(path, opts.append)?))
        }
        None => Box::new(io::stdout().lock()),
    };

    let report = scrub_stream(&mut reader, writer, &opts.scrubber, opts.finish_on_eof)
        .context("Failed to write scrubbed output")?;

    debug!(
        "Scrub finished. Bytes read: {}, max_pending_bytes: {:?}",
        report.bytes_read, opts.scrubber.max_pending_bytes
    );
    if report.dropped_tail_bytes > 0 {
        warn!(
            "Input ended without a newline; dropped {} unterminated bytes.",
            report.dropped_tail_bytes
        );
    }
    info!("Scrub operation completed.");
    Ok(report)
}
