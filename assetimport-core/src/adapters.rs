//! Default filesystem-backed and in-memory port implementations.

use crate::ports::{AssetStore, RowSource, WritePort};
use anyhow::Context;
use assetimport_domain::{AssetLookup, Row, StoreError};
use assetimport_types::AssetRecord;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Longest document id the store accepts, in bytes.
pub const MAX_DOCUMENT_ID_BYTES: usize = 1500;

/// Check `id` against document-store key rules.
pub fn validate_document_id(id: &str) -> Result<(), StoreError> {
    let reason = if id.is_empty() {
        Some("must not be empty")
    } else if id.len() > MAX_DOCUMENT_ID_BYTES {
        Some("longer than 1500 bytes")
    } else if id.contains('/') {
        Some("must not contain '/'")
    } else if id == "." || id == ".." {
        Some("must not be '.' or '..'")
    } else if id.len() >= 4 && id.starts_with("__") && id.ends_with("__") {
        Some("ids of the form __name__ are reserved")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StoreError::InvalidId {
            id: id.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Row sources
// ---------------------------------------------------------------------------

/// Loads rows from a CSV or spreadsheet file.
#[derive(Debug, Clone)]
pub struct FileRowSource {
    pub path: Utf8PathBuf,
}

impl FileRowSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl RowSource for FileRowSource {
    fn load_rows(&self) -> anyhow::Result<Vec<Row>> {
        assetimport_tabular::load_rows(&self.path)
            .with_context(|| format!("load rows from {}", self.path))
    }

    fn describe(&self) -> String {
        self.path.to_string()
    }

    fn sha256(&self) -> anyhow::Result<Option<String>> {
        let bytes = fs_err::read(&self.path).with_context(|| format!("hash {}", self.path))?;
        Ok(Some(hex::encode(Sha256::digest(&bytes))))
    }
}

/// Pre-loaded rows for embedding and testing.
#[derive(Debug, Clone)]
pub struct InMemoryRowSource {
    label: String,
    rows: Vec<Row>,
}

impl InMemoryRowSource {
    pub fn new(label: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            label: label.into(),
            rows,
        }
    }
}

impl RowSource for InMemoryRowSource {
    fn load_rows(&self) -> anyhow::Result<Vec<Row>> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

// ---------------------------------------------------------------------------
// Asset stores
// ---------------------------------------------------------------------------

/// One pretty-printed JSON document per asset: `<root>/<asset_id>.json`.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: Utf8PathBuf,
}

impl FsAssetStore {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn document_path(&self, asset_id: &str) -> Result<Utf8PathBuf, StoreError> {
        validate_document_id(asset_id)?;
        Ok(self.root.join(format!("{asset_id}.json")))
    }
}

#[async_trait]
impl AssetLookup for FsAssetStore {
    async fn exists(&self, asset_id: &str) -> Result<bool, StoreError> {
        let path = self.document_path(asset_id)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn get(&self, asset_id: &str) -> Result<Option<AssetRecord>, StoreError> {
        let path = self.document_path(asset_id)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Serialization {
                id: asset_id.to_string(),
                source,
            })
    }

    async fn set(&self, mut record: AssetRecord) -> Result<AssetRecord, StoreError> {
        let path = self.document_path(&record.asset_id)?;
        if record.created_at.is_none() {
            record.created_at = Some(Utc::now());
        }
        let mut bytes =
            serde_json::to_vec_pretty(&record).map_err(|source| StoreError::Serialization {
                id: record.asset_id.clone(),
                source,
            })?;
        bytes.push(b'\n');

        tokio::fs::create_dir_all(&self.root).await?;
        let tmp = self.root.join(format!("{}.json.tmp", record.asset_id));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(asset_id = record.asset_id.as_str(), path = path.as_str(), "wrote document");
        Ok(record)
    }
}

/// `BTreeMap`-backed store for embedding and testing.
///
/// Applies the same id rules as [`FsAssetStore`] and counts lookups and
/// writes so callers can assert on storage traffic.
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    docs: Mutex<BTreeMap<String, AssetRecord>>,
    lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `records`, keyed by their `asset_id`.
    pub fn with_records(records: impl IntoIterator<Item = AssetRecord>) -> Self {
        let docs = records
            .into_iter()
            .map(|r| (r.asset_id.clone(), r))
            .collect();
        Self {
            docs: Mutex::new(docs),
            ..Self::default()
        }
    }

    /// Stored records ordered by `asset_id`.
    pub fn records(&self) -> Vec<AssetRecord> {
        self.lock()
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, AssetRecord>>, StoreError> {
        self.docs.lock().map_err(|_| StoreError::Backend {
            message: "in-memory store lock poisoned".to_string(),
        })
    }
}

#[async_trait]
impl AssetLookup for InMemoryAssetStore {
    async fn exists(&self, asset_id: &str) -> Result<bool, StoreError> {
        validate_document_id(asset_id)?;
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock()?.contains_key(asset_id))
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn get(&self, asset_id: &str) -> Result<Option<AssetRecord>, StoreError> {
        validate_document_id(asset_id)?;
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock()?.get(asset_id).cloned())
    }

    async fn set(&self, mut record: AssetRecord) -> Result<AssetRecord, StoreError> {
        validate_document_id(&record.asset_id)?;
        if record.created_at.is_none() {
            record.created_at = Some(Utc::now());
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.lock()?
            .insert(record.asset_id.clone(), record.clone());
        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Write port
// ---------------------------------------------------------------------------

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs_err::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs_err::write(path, contents).with_context(|| format!("write {}", path))
    }
}
