//! Domain logic: turn raw rows into normalized asset payloads and unique ids.
//!
//! This crate owns *what* gets written and under which key. It does not own
//! *how* rows are loaded or records are persisted; those are the
//! `assetimport-tabular` and `assetimport-core` crates.

pub mod aliases;
mod normalize;
mod ports;
mod resolver;
mod row;

pub use normalize::{NormalizedRow, normalize_row, normalize_string, parse_number, parse_timestamp};
pub use ports::{AssetLookup, StoreError};
pub use resolver::{
    DuplicateReason, KeyOrigin, MAX_SUFFIX, Resolution, ResolveError, RunState, resolve_asset_id,
};
pub use row::Row;
