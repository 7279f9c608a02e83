//! Status messages printed to stderr.
//!
//! These are for the person running the tool and are separate from the `log`
//! records, which honour `RUST_LOG`. Like log records they are scrubbed before
//! printing. Colour is only used when stderr is a terminal.
//!
//! License: MIT OR Apache-2.0

use is_terminal::IsTerminal;
use owo_colors::{AnsiColors, OwoColorize};
use safelog_core::scrub_line;
use std::io::{self, Write};

/// Severity of a status message; decides the prefix and its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warn,
    Error,
}

impl MessageKind {
    fn prefix(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Warn => "warning",
            MessageKind::Error => "error",
        }
    }

    fn color(self) -> AnsiColors {
        match self {
            MessageKind::Info => AnsiColors::Cyan,
            MessageKind::Warn => AnsiColors::Yellow,
            MessageKind::Error => AnsiColors::Red,
        }
    }
}

/// Writes `[prefix] msg` to `writer`, coloured when `use_color` is set.
pub fn print_message<W: Write>(
    writer: &mut W,
    kind: MessageKind,
    msg: &str,
    use_color: bool,
) -> io::Result<()> {
    if use_color {
        writeln!(writer, "{} {}", format!("[{}]", kind.prefix()).color(kind.color()), msg)
    } else {
        writeln!(writer, "[{}] {}", kind.prefix(), msg)
    }
}

fn print_to_stderr(kind: MessageKind, msg: &str) {
    let stderr = io::stderr();
    let use_color = stderr.is_terminal();
    let _ = print_message(&mut stderr.lock(), kind, &scrub_line(msg), use_color);
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    print_to_stderr(MessageKind::Info, msg.as_ref());
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    print_to_stderr(MessageKind::Warn, msg.as_ref());
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    print_to_stderr(MessageKind::Error, msg.as_ref());
}
