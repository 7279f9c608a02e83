//! errors.rs - Custom error types for the safelog-core library.
//!
//! The scrubbing path itself has exactly one failure mode: the downstream sink
//! refusing a line. Everything else here belongs to configuration loading.
//!
//! License: MIT OR APACHE 2.0

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A downstream sink failed while a completed line was being emitted.
///
/// The chunk that triggered the emission was still accepted into the pending
/// buffer, so `accepted` always equals the length of that chunk. Callers must not
/// resubmit it; the unsent lines are retried on the next write.
#[derive(Error, Debug)]
#[error("sink rejected a scrubbed line ({accepted} bytes accepted): {source}")]
pub struct SinkWriteError {
    pub accepted: usize,
    #[source]
    pub source: io::Error,
}

impl From<SinkWriteError> for io::Error {
    /// Hands the sink's own error back unchanged.
    fn from(err: SinkWriteError) -> Self {
        err.source
    }
}

/// Errors raised while loading or validating a `SafelogConfig`.
///
/// Match on it with a wildcard arm; more configuration sources may add variants.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SafelogError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
