//! Embeddable core library for assetimport.
//!
//! Provides a clap-free, I/O-abstracted import entry point.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`RowSource`](ports::RowSource) — load input rows
//! - [`AssetStore`](ports::AssetStore) — read and upsert asset documents
//! - [`WritePort`](ports::WritePort) — write report files
//!
//! The [`adapters`] module provides filesystem-backed and in-memory
//! implementations.
//!
//! # Entry points
//!
//! - [`run_import`](pipeline::run_import) — resolve and persist every row
//! - [`write_report`](pipeline::write_report) — persist the run report

pub mod adapters;
pub mod credentials;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the row model so embedders don't need assetimport-domain directly.
pub use assetimport_domain::{AssetLookup, Row, StoreError};
