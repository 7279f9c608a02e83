//! Terminal-facing helpers for the safelog CLI.

pub mod messages;
pub mod summary_table;
