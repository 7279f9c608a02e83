//! Table rendering for `safelog scan`.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::commands::scan::ScanSummary;

/// Renders a scan summary as a two-column table.
pub fn render_summary(summary: &ScanSummary) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Metric"), Cell::new("Count")]);

    table.add_row(vec![Cell::new("lines"), Cell::new(summary.lines)]);
    table.add_row(vec![
        Cell::new("lines with addresses"),
        Cell::new(summary.lines_with_addresses),
    ]);
    table.add_row(vec![Cell::new("addresses"), Cell::new(summary.addresses)]);
    for (kind, count) in &summary.by_kind {
        table.add_row(vec![Cell::new(format!("  {kind}")), Cell::new(count)]);
    }
    table.add_row(vec![Cell::new("bracketed"), Cell::new(summary.bracketed)]);
    table.add_row(vec![Cell::new("with port"), Cell::new(summary.with_port)]);
    table.add_row(vec![
        Cell::new("percent-encoded"),
        Cell::new(summary.percent_encoded),
    ]);
    table.to_string()
}
