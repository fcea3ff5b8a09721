//! Integration tests for TabularDataModel against real files on disk.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use tabstat::{LoadCause, TabularDataModel};
use tempfile::{tempdir, TempDir};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A model with a notification counter attached.
fn counted_model() -> (TabularDataModel, Rc<Cell<usize>>) {
    let mut model = TabularDataModel::new();
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    model.subscribe(move || counter.set(counter.get() + 1));
    (model, count)
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_empty_state_defaults() {
    let model = TabularDataModel::new();
    assert_eq!(model.row_count(), 0);
    assert_eq!(model.column_count(), 0);
    for r in 0..4 {
        for c in 0..4 {
            assert_eq!(model.cell_at(r, c), None);
        }
    }
    for k in 0..4 {
        assert_eq!(model.column_mean(k), 0.0);
    }
    assert_eq!(model.cell_at(usize::MAX, usize::MAX), None);
}

#[test]
fn test_basic_scenario() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.txt", "1 2\n3 4\n5 6\n");

    let (mut model, count) = counted_model();
    model.set_source(&path).unwrap();

    assert_eq!(model.row_count(), 3);
    assert_eq!(model.column_count(), 2);
    assert_eq!(model.cell_at(1, 1), Some(4.0));
    assert_eq!(model.first_column_mean(), 3.0);
    assert_eq!(model.second_column_mean(), 4.0);
    assert_eq!(model.source(), path.to_string_lossy());
    assert_eq!(model.source_path(), Some(path.as_path()));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_failed_reload_keeps_previous_dataset() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n3 4\n");
    let b = write_file(&dir, "b.txt", "10 20 30\n40\n");

    let (mut model, count) = counted_model();
    model.set_source(&a).unwrap();

    let err = model.set_source(&b).unwrap_err();
    assert_eq!(err.path, b);
    assert!(matches!(
        err.cause,
        LoadCause::Ragged {
            line: 2,
            expected: 3,
            found: 1
        }
    ));

    assert_eq!(model.source(), a.to_string_lossy());
    assert_eq!(model.row_count(), 2);
    assert_eq!(model.column_count(), 2);
    assert_eq!(model.cell_at(0, 2), None);
    assert_eq!(model.cell_at(1, 0), Some(3.0));
    assert_eq!(model.first_column_mean(), 2.0);
    assert_eq!(model.second_column_mean(), 3.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_ragged_file_on_empty_model() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "ragged.txt", "1 2\n3\n");

    let (mut model, count) = counted_model();
    let err = model.set_source(&path).unwrap_err();

    assert!(!err.is_io());
    assert!(matches!(err.cause, LoadCause::Ragged { line: 2, .. }));
    assert_eq!(model.source(), "");
    assert_eq!(model.row_count(), 0);
    assert_eq!(count.get(), 0);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let good = write_file(&dir, "good.txt", "7 8\n");
    let missing = dir.path().join("missing.txt");

    let (mut model, count) = counted_model();
    model.set_source(&good).unwrap();

    let err = model.set_source(&missing).unwrap_err();
    assert!(matches!(err.cause, LoadCause::NotFound));
    assert_eq!(err.path, missing);
    assert!(err.is_io());

    assert_eq!(model.source(), good.to_string_lossy());
    assert_eq!(model.cell_at(0, 1), Some(8.0));
    assert_eq!(count.get(), 1);
}

#[test]
fn test_directory_is_unreadable() {
    let dir = tempdir().unwrap();
    let mut model = TabularDataModel::new();
    let err = model.set_source(dir.path()).unwrap_err();
    assert!(err.is_io());
    assert_eq!(model.row_count(), 0);
}

#[test]
fn test_one_notification_per_successful_load() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n");
    let bad = write_file(&dir, "bad.txt", "1 x\n");

    let (mut model, count) = counted_model();
    model.set_source(&a).unwrap();
    assert_eq!(count.get(), 1);
    model.set_source(&a).unwrap();
    assert_eq!(count.get(), 2);
    assert!(model.set_source(&bad).is_err());
    assert_eq!(count.get(), 2);
}

#[test]
fn test_shape_consistency() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "m.txt", "1 2 3\n4 5 6\n");

    let mut model = TabularDataModel::new();
    model.set_source(&path).unwrap();

    for r in 0..5 {
        for c in 0..5 {
            let inside = r < model.row_count() && c < model.column_count();
            assert_eq!(model.cell_at(r, c).is_some(), inside, "cell ({r}, {c})");
        }
    }
}

#[test]
fn test_mean_matches_cells() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "m.txt",
        "0.1 -3.5 1e3\n0.2 2.25 -7\n0.3 0.125 12.5\n0.7 9 0\n",
    );

    let mut model = TabularDataModel::new();
    model.set_source(&path).unwrap();

    for k in 0..model.column_count() {
        let sum: f64 = (0..model.row_count())
            .map(|r| model.cell_at(r, k).unwrap())
            .sum();
        let expected = sum / model.row_count() as f64;
        assert!(approx_eq(model.column_mean(k), expected), "column {k}");
    }
    assert_eq!(model.column_mean(3), 0.0);
}

#[test]
fn test_single_column_second_mean_is_zero() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "one.txt", "2\n4\n");

    let mut model = TabularDataModel::new();
    model.set_source(&path).unwrap();

    assert_eq!(model.column_count(), 1);
    assert_eq!(model.first_column_mean(), 3.0);
    assert_eq!(model.second_column_mean(), 0.0);
}

#[test]
fn test_reload_replaces_everything() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2 3\n4 5 6\n7 8 9\n");
    let b = write_file(&dir, "b.txt", "10 20\n");

    let mut model = TabularDataModel::new();
    model.set_source(&a).unwrap();
    model.set_source(&b).unwrap();

    assert_eq!(model.source(), b.to_string_lossy());
    assert_eq!(model.row_count(), 1);
    assert_eq!(model.column_count(), 2);
    assert_eq!(model.cell_at(1, 0), None);
    assert_eq!(model.cell_at(0, 2), None);
    assert_eq!(model.first_column_mean(), 10.0);
}

#[test]
fn test_snapshot_survives_reload() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n");
    let b = write_file(&dir, "b.txt", "3 4\n5 6\n");

    let mut model = TabularDataModel::new();
    model.set_source(&a).unwrap();
    let before = model.snapshot().unwrap();

    model.set_source(&b).unwrap();
    assert_eq!(before.shape(), (1, 2));
    assert_eq!(before.get(0, 0), Some(1.0));
    assert_eq!(model.snapshot().unwrap().shape(), (2, 2));
}

#[test]
fn test_unsubscribed_callback_is_not_called() {
    let dir = tempdir().unwrap();
    let a = write_file(&dir, "a.txt", "1 2\n");

    let (mut model, count) = counted_model();
    let other = Rc::new(Cell::new(0));
    let counter = Rc::clone(&other);
    let id = model.subscribe(move || counter.set(counter.get() + 1));
    assert_eq!(model.subscriber_count(), 2);

    assert!(model.unsubscribe(id));
    model.set_source(&a).unwrap();

    assert_eq!(count.get(), 1);
    assert_eq!(other.get(), 0);
}

#[test]
fn test_csv_extension_uses_comma() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.csv", "# x,y\n1,2\n3,4\n5,6\n");

    let mut model = TabularDataModel::new();
    model.set_source(&path).unwrap();

    assert_eq!(model.row_count(), 3);
    assert_eq!(model.second_column_mean(), 4.0);
}

#[test]
fn test_empty_file_fails_without_changing_state() {
    let dir = tempdir().unwrap();
    let good = write_file(&dir, "good.txt", "1 2\n");
    let empty = write_file(&dir, "empty.txt", "# nothing here\n\n");

    let (mut model, count) = counted_model();
    model.set_source(&good).unwrap();

    let err = model.set_source(&empty).unwrap_err();
    assert!(matches!(err.cause, LoadCause::Empty));
    assert_eq!(model.source(), good.to_string_lossy());
    assert_eq!(count.get(), 1);
}

#[test]
fn test_error_chain_names_path_and_cause() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "bad.txt", "1 2\n3 oops\n");

    let mut model = TabularDataModel::new();
    let err = anyhow::Error::from(model.set_source(&path).unwrap_err());
    let text = format!("{err:#}");

    assert!(text.contains("bad.txt"));
    assert!(text.contains("line 2, column 2: 'oops' is not a number"));
}
