/// Data layer: the matrix type, loading, and load errors.
///
/// Architecture:
/// ```text
///  .txt / .dat / .csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (all or nothing)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  rows × cols f64, row-major, immutable
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;

pub use error::{LoadCause, LoadError};
pub use loader::{load_file, parse_str, Delimiter, LoadOptions};
pub use model::Dataset;
