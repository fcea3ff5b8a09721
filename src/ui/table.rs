use std::fmt::Write;

use crate::state::TabularDataModel;

// ---------------------------------------------------------------------------
// Grid rendering
// ---------------------------------------------------------------------------

/// Render the first `max_rows` rows of the model as a right-aligned text grid.
///
/// Only the polling queries (`row_count`, `column_count`, `cell_at`) are
/// used, so this works for any model state.
pub fn render_grid(model: &TabularDataModel, max_rows: usize) -> String {
    let rows = model.row_count();
    let cols = model.column_count();
    if rows == 0 || cols == 0 {
        return "No dataset loaded.\n".to_string();
    }

    let shown = rows.min(max_rows);

    // Format every visible cell up front so column widths can be measured.
    let cells: Vec<Vec<String>> = (0..shown)
        .map(|r| (0..cols).map(|c| format_cell(model.cell_at(r, c))).collect())
        .collect();

    let index_width = (rows - 1).to_string().len().max(1);
    let widths: Vec<usize> = (0..cols)
        .map(|c| {
            let header = format!("c{c}").len();
            cells.iter().map(|row| row[c].len()).fold(header, usize::max)
        })
        .collect();

    let mut out = String::new();

    let _ = write!(out, "{:>index_width$} │", "");
    for (c, &w) in widths.iter().enumerate() {
        let _ = write!(out, " {:>w$}", format!("c{c}"));
    }
    out.push('\n');

    let rule_len = widths.iter().map(|w| w + 1).sum::<usize>();
    let _ = writeln!(out, "{}┼{}", "─".repeat(index_width + 1), "─".repeat(rule_len));

    for (r, row) in cells.iter().enumerate() {
        let _ = write!(out, "{r:>index_width$} │");
        for (cell, &w) in row.iter().zip(&widths) {
            let _ = write!(out, " {cell:>w$}");
        }
        out.push('\n');
    }

    if shown < rows {
        let _ = writeln!(out, "… {} more rows", rows - shown);
    }

    out
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}
