//! Shared DTOs for the assetimport workspace.
//!
//! # Design constraints
//! - [`asset::AssetRecord`] is the on-disk document shape; field names are
//!   part of the stored schema and must not change.
//! - Report types are serialized next to the input file; prefer adding
//!   optional fields over changing semantics.

pub mod asset;
pub mod cell;
pub mod report;

pub use asset::{AssetPayload, AssetRecord, DEFAULT_ASSET_STATUS};
pub use cell::CellValue;
pub use report::{ImportReport, ImportSummary, RowOutcome, RowStatus, RunMode};

/// Schema identifiers.
pub mod schema {
    pub const ASSETIMPORT_REPORT_V1: &str = "assetimport.report.v1";
}
