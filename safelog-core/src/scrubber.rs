// safelog-core/src/scrubber.rs
//! `LogScrubber`: a `Write` adapter that scrubs addresses line by line.
//!
//! Writes may arrive in arbitrary pieces, so an address can straddle two calls.
//! Bytes are held in a pending buffer until a newline completes the line; only
//! then is the line scrubbed and forwarded, followed by a single `\n`.
//!
//! Nothing in this module logs. A scrubber is routinely installed as the target of
//! the process logger, and logging from inside `write` would re-enter it.
//!
//! License: MIT OR APACHE 2.0

use std::io::{self, Write};

use crate::config::ScrubberConfig;
use crate::errors::SinkWriteError;
use crate::patterns;

/// Line-buffering, address-scrubbing writer.
///
/// The sink is written to but never closed. To keep ownership of it, pass a
/// `&mut W`. A scrubber needs `&mut self` for every write, so sharing one
/// between producers requires external locking.
///
/// ```
/// use std::io::Write;
/// use safelog_core::LogScrubber;
///
/// let mut out = Vec::new();
/// let mut scrubber = LogScrubber::new(&mut out);
/// scrubber.write_all(b"dial 10.0.0")?;
/// scrubber.write_all(b".7:443 failed\n")?;
/// drop(scrubber);
/// assert_eq!(out, b"dial [scrubbed] failed\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct LogScrubber<W: Write> {
    sink: W,
    pending: Vec<u8>,
    /// Bytes of the first pending line's scrubbed output that the sink already
    /// accepted before failing.
    line_written: usize,
    max_pending_bytes: Option<usize>,
}

impl<W: Write> LogScrubber<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            pending: Vec::new(),
            line_written: 0,
            max_pending_bytes: None,
        }
    }

    pub fn with_config(sink: W, config: &ScrubberConfig) -> Self {
        Self {
            sink,
            pending: Vec::new(),
            line_written: 0,
            max_pending_bytes: config.max_pending_bytes,
        }
    }

    /// Accepts `chunk` and emits every line it completes.
    ///
    /// On success the returned count is always `chunk.len()`. On failure the
    /// chunk has still been buffered; the error carries the same count so the
    /// caller knows not to send it again. If the sink took part of a line before
    /// failing, the retry resumes after that part.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<usize, SinkWriteError> {
        self.pending.extend_from_slice(chunk);
        self.emit_complete_lines()
            .and_then(|()| self.enforce_pending_cap())
            .map(|()| chunk.len())
            .map_err(|source| SinkWriteError {
                accepted: chunk.len(),
                source,
            })
    }

    /// Emits complete lines, then the unterminated remainder as a final line,
    /// then flushes the sink.
    ///
    /// This is the end-of-stream step. It is never run implicitly.
    pub fn finish(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() && !self.pending.ends_with(b"\n") {
            self.pending.push(b'\n');
        }
        self.emit_complete_lines()?;
        self.sink.flush()
    }

    /// Bytes received but not yet emitted.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Returns the sink together with whatever was still pending.
    pub fn into_parts(self) -> (W, Vec<u8>) {
        (self.sink, self.pending)
    }

    /// Emits every newline-terminated line in `pending` and drops it from the
    /// buffer. If the sink fails, the failed line and everything after it stay
    /// buffered.
    fn emit_complete_lines(&mut self) -> io::Result<()> {
        let mut consumed = 0;
        let result = loop {
            let Some(offset) = self.pending[consumed..].iter().position(|&b| b == b'\n') else {
                break Ok(());
            };
            let newline = consumed + offset;
            let line = &self.pending[consumed..newline];
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if let Err(err) = emit_line(&mut self.sink, line, &mut self.line_written) {
                break Err(err);
            }
            consumed = newline + 1;
        };
        self.pending.drain(..consumed);
        result
    }

    fn enforce_pending_cap(&mut self) -> io::Result<()> {
        let Some(cap) = self.max_pending_bytes else {
            return Ok(());
        };
        if self.pending.len() <= cap {
            return Ok(());
        }
        // Terminate the tail in place so a failed emission retries the same line.
        self.pending.push(b'\n');
        self.emit_complete_lines()
    }
}

/// Scrubs one line and writes it with a single trailing newline.
///
/// `written` counts the bytes of this line the sink has already taken. It
/// survives a failed call so the retry skips them, and is reset once the line
/// is complete.
fn emit_line<W: Write>(sink: &mut W, line: &[u8], written: &mut usize) -> io::Result<()> {
    let mut out = patterns::scrub_bytes(line).into_owned();
    out.push(b'\n');
    while *written < out.len() {
        match sink.write(&out[*written..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "failed to write whole scrubbed line",
                ));
            }
            Ok(n) => *written += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    *written = 0;
    Ok(())
}

impl<W: Write> Write for LogScrubber<W> {
    /// Always reports the whole buffer as written. A sink error is returned
    /// unchanged, but the bytes have been buffered regardless.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.feed(buf)?)
    }

    /// Flushes the sink. Pending bytes stay pending; see [`LogScrubber::finish`].
    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
