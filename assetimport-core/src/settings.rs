//! Clap-free settings for the import pipeline and the document store.

use crate::adapters::validate_document_id;
use assetimport_domain::StoreError;
use assetimport_types::RunMode;
use camino::Utf8PathBuf;

pub const DEFAULT_PROGRESS_EVERY: usize = 20;
pub const DEFAULT_PREVIEW_COLUMNS: usize = 12;
pub const DEFAULT_DATA_DIR: &str = ".assetimport";
pub const DEFAULT_COLLECTION: &str = "assets";

/// Settings for [`run_import`](crate::pipeline::run_import).
#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub mode: RunMode,

    /// Log a progress line every N processed rows; 0 disables it.
    pub progress_every: usize,

    /// Number of column names shown when a row has no identifier.
    pub preview_columns: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            mode: RunMode::DryRun,
            progress_every: DEFAULT_PROGRESS_EVERY,
            preview_columns: DEFAULT_PREVIEW_COLUMNS,
        }
    }
}

/// Where the filesystem document store keeps its collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub data_dir: Utf8PathBuf,
    pub collection: String,
}

impl StoreSettings {
    /// Directory holding the documents of `project_id`'s collection.
    ///
    /// Both segments follow document id rules, so neither can leave
    /// `data_dir`.
    pub fn collection_dir(&self, project_id: &str) -> Result<Utf8PathBuf, StoreError> {
        validate_document_id(project_id)?;
        validate_document_id(&self.collection)?;
        Ok(self.data_dir.join(project_id).join(&self.collection))
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_dir: Utf8PathBuf::from(DEFAULT_DATA_DIR),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_dry_run() {
        let s = ImportSettings::default();
        assert!(s.mode.is_dry_run());
        assert_eq!(s.progress_every, 20);
        assert_eq!(s.preview_columns, 12);
    }

    #[test]
    fn collection_dir_nests_project_and_collection() {
        let s = StoreSettings::default();
        assert_eq!(
            s.collection_dir("demo-project").unwrap(),
            Utf8PathBuf::from(".assetimport/demo-project/assets")
        );
    }

    #[test]
    fn collection_dir_rejects_segments_that_escape_data_dir() {
        let s = StoreSettings::default();
        for project in ["..", "../x", "a/b", ""] {
            assert!(
                matches!(s.collection_dir(project), Err(StoreError::InvalidId { .. })),
                "{project:?} should be rejected"
            );
        }

        let s = StoreSettings {
            collection: "../../etc".to_string(),
            ..StoreSettings::default()
        };
        assert!(s.collection_dir("demo").is_err());
    }
}
