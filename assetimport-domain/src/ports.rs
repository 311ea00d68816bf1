use async_trait::async_trait;
use thiserror::Error;

/// Read-only view of the persisted asset collection.
///
/// Identifier resolution only needs existence checks; writes go through the
/// `AssetStore` port in `assetimport-core`.
#[async_trait]
pub trait AssetLookup: Send + Sync {
    async fn exists(&self, asset_id: &str) -> Result<bool, StoreError>;
}

/// Failures talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid document id {id:?}: {reason}")]
    InvalidId { id: String, reason: &'static str },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document {id} is not valid json: {source}")]
    Serialization {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store backend error: {message}")]
    Backend { message: String },
}
