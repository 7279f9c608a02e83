// safelog/src/lib.rs
//! # safelog CLI Application
//!
//! Command-line front end for `safelog-core`. `safelog scrub` streams a log
//! through the address scrubber; `safelog scan` reports how many addresses an
//! input holds without printing any of them.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
