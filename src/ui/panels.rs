use std::fmt::Write;

use serde::Serialize;

use crate::data::Dataset;
use crate::state::TabularDataModel;

// ---------------------------------------------------------------------------
// Summary panel – source, shape and the two column means
// ---------------------------------------------------------------------------

/// Everything a view shows next to the grid, read from the model in one go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub source: String,
    pub rows: usize,
    pub columns: usize,
    pub first_column_mean: f64,
    pub second_column_mean: f64,
    pub column_means: Vec<f64>,
    /// Copy of the loaded matrix; `null` when nothing is loaded.
    pub data: Option<Dataset>,
}

impl Summary {
    pub fn from_model(model: &TabularDataModel) -> Self {
        let data = model.snapshot().map(|ds| Dataset::clone(&ds));

        Self {
            source: model.source().into_owned(),
            rows: model.row_count(),
            columns: model.column_count(),
            first_column_mean: model.first_column_mean(),
            second_column_mean: model.second_column_mean(),
            column_means: data.as_ref().map(Dataset::column_means).unwrap_or_default(),
            data,
        }
    }
}

/// Render the summary panel shown under the grid.
pub fn summary_panel(model: &TabularDataModel) -> String {
    let mut out = String::new();

    if model.row_count() == 0 {
        let _ = writeln!(out, "Source:  (none)");
        return out;
    }

    let _ = writeln!(out, "Source:  {}", model.source());
    let _ = writeln!(
        out,
        "Shape:   {} rows x {} columns",
        model.row_count(),
        model.column_count()
    );
    let _ = writeln!(out, "Mean c0: {:.4}", model.first_column_mean());
    if model.column_count() >= 2 {
        let _ = writeln!(out, "Mean c1: {:.4}", model.second_column_mean());
    } else {
        let _ = writeln!(out, "Mean c1: n/a (single column)");
    }
    out
}
