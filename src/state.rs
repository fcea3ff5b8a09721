use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data::{load_file, Dataset, LoadError, LoadOptions};
use crate::signal::{ChangeSignal, SubscriptionId};

// ---------------------------------------------------------------------------
// ModelHandle – owner of at most one dataset
// ---------------------------------------------------------------------------

/// A dataset together with the path it was loaded from.
#[derive(Debug, Clone)]
struct LoadedSource {
    path: PathBuf,
    dataset: Arc<Dataset>,
}

/// Owns the current dataset, if any, and the path it came from.
///
/// Path and dataset live in one `Option` so one can never be present
/// without the other.
#[derive(Debug, Clone, Default)]
pub struct ModelHandle {
    loaded: Option<LoadedSource>,
}

impl ModelHandle {
    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|l| l.path.as_path())
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    fn replace(&mut self, path: PathBuf, dataset: Dataset) {
        self.loaded = Some(LoadedSource {
            path,
            dataset: Arc::new(dataset),
        });
    }
}

// ---------------------------------------------------------------------------
// TabularDataModel
// ---------------------------------------------------------------------------

/// A table of numbers loaded from a file, with column means and a change
/// signal.
///
/// `set_source` is the only fallible operation. Every query is total: with
/// nothing loaded, counts are 0, cells are `None` and means are `0.0`.
#[derive(Debug, Default)]
pub struct TabularDataModel {
    handle: ModelHandle,
    options: LoadOptions,
    changed: ChangeSignal,
}

impl TabularDataModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Parsing options used by the next `set_source`.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Replace the parsing options. Does not reload or notify.
    pub fn set_options(&mut self, options: LoadOptions) {
        self.options = options;
    }

    /// Load `path` and make it the current dataset.
    ///
    /// The file is parsed completely before anything is replaced. On success
    /// the change signal fires once, after the swap. On failure the model is
    /// left exactly as it was and nothing fires.
    pub fn set_source(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let dataset = match load_file(path, &self.options) {
            Ok(ds) => ds,
            Err(e) => {
                log::warn!("{e}: {}", e.cause);
                return Err(e);
            }
        };

        log::info!(
            "Loaded {} rows x {} columns from {}",
            dataset.rows(),
            dataset.cols(),
            path.display()
        );
        self.handle.replace(path.to_path_buf(), dataset);
        self.changed.emit();
        Ok(())
    }

    /// The last successfully loaded path, or `""`.
    pub fn source(&self) -> Cow<'_, str> {
        match self.handle.source_path() {
            Some(p) => p.to_string_lossy(),
            None => Cow::Borrowed(""),
        }
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.handle.source_path()
    }

    pub fn row_count(&self) -> usize {
        self.handle.dataset().map_or(0, |ds| ds.rows())
    }

    pub fn column_count(&self) -> usize {
        self.handle.dataset().map_or(0, |ds| ds.cols())
    }

    /// The value at `(row, col)`, or `None` outside the loaded shape.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<f64> {
        self.handle.dataset()?.get(row, col)
    }

    /// Mean of column `col`; `0.0` with nothing loaded or `col` out of range.
    pub fn column_mean(&self, col: usize) -> f64 {
        self.handle
            .dataset()
            .and_then(|ds| ds.column_mean(col))
            .unwrap_or(0.0)
    }

    pub fn first_column_mean(&self) -> f64 {
        self.column_mean(0)
    }

    pub fn second_column_mean(&self) -> f64 {
        self.column_mean(1)
    }

    /// A read-only view of the current dataset. It keeps the data it was
    /// taken with even after a later reload.
    pub fn snapshot(&self) -> Option<Arc<Dataset>> {
        self.handle.dataset().cloned()
    }

    /// Call `callback` after every successful `set_source`.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.changed.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.changed.subscriber_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_model_defaults() {
        let model = TabularDataModel::new();
        assert_eq!(model.source(), "");
        assert!(model.source_path().is_none());
        assert_eq!(model.row_count(), 0);
        assert_eq!(model.column_count(), 0);
        assert_eq!(model.cell_at(0, 0), None);
        assert_eq!(model.first_column_mean(), 0.0);
        assert_eq!(model.second_column_mean(), 0.0);
        assert!(model.snapshot().is_none());
    }

    #[test]
    fn failed_load_on_empty_model_keeps_it_empty() {
        let mut model = TabularDataModel::new();
        let err = model
            .set_source("/definitely/not/here/data.txt")
            .unwrap_err();
        assert!(err.is_io());
        assert_eq!(model.source(), "");
        assert_eq!(model.row_count(), 0);
    }

    #[test]
    fn options_are_kept_without_notifying() {
        use std::cell::Cell;
        use std::rc::Rc;

        let fired = Rc::new(Cell::new(0));
        let mut model = TabularDataModel::new();
        let counter = Rc::clone(&fired);
        model.subscribe(move || counter.set(counter.get() + 1));

        model.set_options(LoadOptions::default().with_skip_rows(2));
        assert_eq!(model.options().skip_rows, 2);
        assert_eq!(fired.get(), 0);
    }
}
