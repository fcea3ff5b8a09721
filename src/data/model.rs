use serde::ser::{Serialize, SerializeStruct, Serializer};

// ---------------------------------------------------------------------------
// Dataset – the complete loaded matrix
// ---------------------------------------------------------------------------

/// An immutable rectangular matrix of `f64`, stored row-major.
///
/// A dataset produced by the loader always has at least one row and one
/// column. Every accessor is bounds-checked and returns `None` instead of
/// panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from already validated row-major values.
    pub(crate) fn from_parts(rows: usize, cols: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(rows * cols, values.len());
        debug_assert!(rows > 0 && cols > 0);
        Self { rows, cols, values }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.row(row)?.get(col).copied()
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.values.get(start..start + self.cols)
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.cols)
    }

    /// Arithmetic mean of one column: the column sum divided by the row count.
    pub fn column_mean(&self, col: usize) -> Option<f64> {
        if col >= self.cols {
            return None;
        }
        let sum: f64 = self.iter_rows().map(|r| r[col]).sum();
        Some(sum / self.rows as f64)
    }

    /// Means of every column, in column order.
    pub fn column_means(&self) -> Vec<f64> {
        (0..self.cols)
            .filter_map(|c| self.column_mean(c))
            .collect()
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<&[f64]> = self.iter_rows().collect();
        let mut state = serializer.serialize_struct("Dataset", 3)?;
        state.serialize_field("rows", &self.rows)?;
        state.serialize_field("cols", &self.cols)?;
        state.serialize_field("values", &rows)?;
        state.end()
    }
}
