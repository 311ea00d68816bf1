//! Tabular input loading.
//!
//! Turns a CSV or spreadsheet file into [`Row`](assetimport_domain::Row)
//! values in file order. The loader is tolerant: short records are padded
//! with empty cells and extra cells are dropped, so a ragged export still
//! reaches the importer, which reports the bad rows individually.

mod load;

pub use load::{InputFormat, LoadError, load_rows, read_csv};
