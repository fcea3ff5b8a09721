//! # tabstat
//!
//! Load a numeric matrix from a text file and expose it as a table with
//! column means and a change signal.
//!
//! A [`TabularDataModel`] owns at most one [`Dataset`]. `set_source` parses
//! the whole file before swapping it in and then notifies subscribers once.
//! All queries are total: before the first successful load they return
//! zero, `None` or `0.0`.
//!
//! ```no_run
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tabstat::TabularDataModel;
//!
//! let mut model = TabularDataModel::new();
//! let reloads = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&reloads);
//! model.subscribe(move || counter.set(counter.get() + 1));
//!
//! model.set_source("data.txt")?;
//! println!("{} x {}", model.row_count(), model.column_count());
//! println!("x̄ = {}, ȳ = {}", model.first_column_mean(), model.second_column_mean());
//! # Ok::<(), tabstat::LoadError>(())
//! ```

pub mod data;
pub mod signal;
pub mod state;
pub mod ui;

pub use data::{Dataset, Delimiter, LoadCause, LoadError, LoadOptions};
pub use signal::{ChangeSignal, SubscriptionId};
pub use state::{ModelHandle, TabularDataModel};
