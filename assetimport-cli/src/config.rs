//! Configuration file loading for assetimport.
//!
//! Discovers and loads `assetimport.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use assetimport_core::settings::{DEFAULT_PROGRESS_EVERY, StoreSettings};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "assetimport.toml";

/// Top-level configuration from assetimport.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetImportConfig {
    pub store: StoreConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Root of the filesystem document store.
    pub data_dir: Option<Utf8PathBuf>,

    /// Collection holding the asset documents.
    pub collection: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Log a progress line every N processed rows.
    pub progress_every: Option<usize>,

    /// Where to write the JSON run report.
    pub report: Option<Utf8PathBuf>,
}

/// Look for `assetimport.toml` in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<AssetImportConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<AssetImportConfig> {
    let config: AssetImportConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<AssetImportConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(AssetImportConfig::default()),
    }
}

/// Effective settings after merging the config file with CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub store: StoreSettings,
    pub progress_every: usize,
    pub report: Option<Utf8PathBuf>,
}

/// CLI values that override the config file when present.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<Utf8PathBuf>,
    pub collection: Option<String>,
    pub progress_every: Option<usize>,
    pub report: Option<Utf8PathBuf>,
}

pub struct ConfigMerger {
    config: AssetImportConfig,
}

impl ConfigMerger {
    pub fn new(config: AssetImportConfig) -> Self {
        Self { config }
    }

    /// Relative paths are resolved against `base_dir`.
    pub fn merge(self, cli: CliOverrides, base_dir: &Utf8Path) -> MergedConfig {
        let defaults = StoreSettings::default();
        let data_dir = cli
            .data_dir
            .or(self.config.store.data_dir)
            .unwrap_or(defaults.data_dir);
        let collection = cli
            .collection
            .or(self.config.store.collection)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(defaults.collection);

        MergedConfig {
            store: StoreSettings {
                data_dir: resolve(base_dir, data_dir),
                collection,
            },
            progress_every: cli
                .progress_every
                .or(self.config.import.progress_every)
                .unwrap_or(DEFAULT_PROGRESS_EVERY),
            report: cli
                .report
                .or(self.config.import.report)
                .map(|p| resolve(base_dir, p)),
        }
    }
}

/// Join `path` onto `base_dir` unless it is already absolute.
pub fn resolve(base_dir: &Utf8Path, path: Utf8PathBuf) -> Utf8PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
