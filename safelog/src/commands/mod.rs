//! Subcommand implementations.

pub mod scan;
pub mod scrub;
