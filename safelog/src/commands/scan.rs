//! `safelog scan`: count what would be scrubbed, without echoing it.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use safelog_core::{find_addresses, AddressKind};

use crate::cli::ScanCommand;
use crate::ui::summary_table;

/// Address counts for a whole input.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub lines: u64,
    pub lines_with_addresses: u64,
    pub addresses: u64,
    pub by_kind: BTreeMap<AddressKind, u64>,
    pub bracketed: u64,
    pub with_port: u64,
    pub percent_encoded: u64,
}

impl ScanSummary {
    /// Adds one line (without its newline) to the tally.
    pub fn record_line(&mut self, line: &[u8]) {
        self.lines += 1;
        let found = find_addresses(line);
        if found.is_empty() {
            return;
        }
        self.lines_with_addresses += 1;
        for m in &found {
            self.addresses += 1;
            *self.by_kind.entry(m.kind).or_insert(0) += 1;
            self.bracketed += u64::from(m.bracketed);
            self.with_port += u64::from(m.has_port);
            self.percent_encoded += u64::from(m.percent_encoded);
        }
    }
}

/// Tallies every line in `reader`. A trailing line without newline counts too.
pub fn scan_reader<R: BufRead>(reader: R) -> io::Result<ScanSummary> {
    let mut summary = ScanSummary::default();
    for line in reader.split(b'\n') {
        let line = line?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        summary.record_line(line);
    }
    Ok(summary)
}

/// Runs the `scan` command, printing the summary to stdout.
pub fn run_scan(cmd: &ScanCommand) -> Result<ScanSummary> {
    info!("Starting scan operation.");
    let summary = match &cmd.input_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            scan_reader(BufReader::new(file))
        }
        None => scan_reader(io::stdin().lock()),
    }
    .context("Failed to read input")?;

    debug!(
        "Scan finished. Lines: {}, addresses: {}",
        summary.lines, summary.addresses
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut out, &summary).context("Failed to serialize summary")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", summary_table::render_summary(&summary))?;
    }
    Ok(summary)
}
