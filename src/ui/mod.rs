//! Plain-text presentation of a [`TabularDataModel`](crate::state::TabularDataModel).

pub mod panels;
pub mod table;

pub use panels::{summary_panel, Summary};
pub use table::render_grid;
