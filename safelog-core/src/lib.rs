// safelog-core/src/lib.rs
//! # safelog Core Library
//!
//! `safelog-core` keeps network addresses out of logs. It provides a `Write`
//! adapter, [`LogScrubber`], that sits between a log producer and its sink,
//! reassembles lines from arbitrarily split writes, and replaces every IPv4 or
//! IPv6 address (with or without port, bracketed, `::`-compressed, IPv4-mapped or
//! percent-encoded) with the literal `[scrubbed]`.
//!
//! Timestamps, colon-separated hex fingerprints and similar look-alikes are left
//! untouched.
//!
//! ## Modules
//!
//! * `scrubber`: The line buffer and its `Write` implementation.
//! * `patterns`: Address detection and per-line scrubbing.
//! * `config`: Optional settings and YAML loading.
//! * `errors`: Error types for sink failures and configuration problems.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::io::Write;
//! use safelog_core::LogScrubber;
//!
//! let mut log_file: Vec<u8> = Vec::new();
//! let mut scrubber = LogScrubber::new(&mut log_file);
//!
//! // The address arrives in two pieces; nothing is emitted until the newline.
//! scrubber.write_all(b"handshake error from 129.97.")?;
//! scrubber.write_all(b"208.23:38310: EOF\n")?;
//! drop(scrubber);
//!
//! assert_eq!(log_file, b"handshake error from [scrubbed]: EOF\n");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Writing through a scrubber can only fail when the sink fails; that error is
//! returned unchanged. Configuration loading uses `anyhow::Result` backed by
//! [`SafelogError`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod patterns;
pub mod scrubber;

pub use config::{OutputConfig, SafelogConfig, ScrubberConfig};
pub use errors::{SafelogError, SinkWriteError};
pub use patterns::{
    contains_address, find_addresses, scrub_bytes, scrub_line, AddressKind, AddressMatch,
    PLACEHOLDER,
};
pub use scrubber::LogScrubber;
