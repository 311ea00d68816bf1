//! Port traits abstracting all I/O away from the pipeline.

use assetimport_domain::{AssetLookup, Row, StoreError};
use assetimport_types::AssetRecord;
use async_trait::async_trait;
use camino::Utf8Path;

/// Source of input rows, in file order.
pub trait RowSource {
    fn load_rows(&self) -> anyhow::Result<Vec<Row>>;

    /// Human-readable name of the input, recorded in the report.
    fn describe(&self) -> String;

    /// Hex SHA-256 of the raw input, when there is one.
    fn sha256(&self) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

/// Document collection keyed by `asset_id`.
#[async_trait]
pub trait AssetStore: AssetLookup {
    async fn get(&self, asset_id: &str) -> Result<Option<AssetRecord>, StoreError>;

    /// Create or overwrite the document. A record without `created_at` is
    /// stamped with the write time; the stored record is returned.
    async fn set(&self, record: AssetRecord) -> Result<AssetRecord, StoreError>;
}

/// File-system write operations. Missing parent directories are created.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}
