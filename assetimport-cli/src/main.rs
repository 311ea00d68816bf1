mod config;

use anyhow::Context;
use assetimport_core::adapters::{FileRowSource, FsAssetStore, FsWritePort};
use assetimport_core::credentials::load_service_account;
use assetimport_core::pipeline::{run_import, write_report};
use assetimport_core::settings::ImportSettings;
use assetimport_render::{render_mode_line, render_summary};
use assetimport_types::RunMode;
use camino::Utf8PathBuf;
use clap::Parser;
use config::{CliOverrides, ConfigMerger};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "assetimport",
    version,
    about = "Import asset rows from CSV or spreadsheet files into the asset store (default: dry-run)."
)]
struct Cli {
    /// Service-account JSON key of the target project.
    #[arg(
        long = "service-account",
        aliases = ["serviceAccount", "service_account"],
        value_name = "PATH"
    )]
    service_account: Utf8PathBuf,

    /// Input file. The format follows the file extension, not the flag spelling.
    #[arg(
        long = "file",
        visible_aliases = ["csv", "xlsx", "xls"],
        value_name = "PATH"
    )]
    input: Utf8PathBuf,

    /// Write to the asset store. Without it the run only reports what it would do.
    #[arg(long, default_value_t = false)]
    commit: bool,

    /// Force a dry-run, even together with --commit.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Config file (default: ./assetimport.toml when present).
    #[arg(long, env = "ASSETIMPORT_CONFIG", value_name = "PATH")]
    config: Option<Utf8PathBuf>,

    /// Root directory of the document store.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<Utf8PathBuf>,

    /// Collection that receives the asset documents.
    #[arg(long)]
    collection: Option<String>,

    /// Log a progress line every N processed rows (0 disables).
    #[arg(long, value_name = "N")]
    progress_every: Option<usize>,

    /// Write a JSON run report here, plus a markdown copy next to it.
    #[arg(long, value_name = "PATH")]
    report: Option<Utf8PathBuf>,
}

#[derive(Debug, Error)]
enum SetupError {
    #[error("input file not found: {path}")]
    InputNotFound { path: Utf8PathBuf },

    #[error("current directory is not valid UTF-8: {path}")]
    NonUtf8Cwd { path: std::path::PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    if let Err(e) = real_main(cli) {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("read current directory")?;
    let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| SetupError::NonUtf8Cwd { path })?;

    let file_config = match &cli.config {
        Some(path) => config::load_config(&config::resolve(&cwd, path.clone()))?,
        None => config::load_or_default(&cwd).context("load assetimport.toml config")?,
    };
    let merged = ConfigMerger::new(file_config).merge(
        CliOverrides {
            data_dir: cli.data_dir.clone(),
            collection: cli.collection.clone(),
            progress_every: cli.progress_every,
            report: cli.report.clone(),
        },
        &cwd,
    );
    debug!(?merged, "merged config");

    let key_path = config::resolve(&cwd, cli.service_account.clone());
    let account = load_service_account(&key_path)?;

    let input = config::resolve(&cwd, cli.input.clone());
    if !input.is_file() {
        return Err(SetupError::InputNotFound { path: input }.into());
    }

    let mode = RunMode::from_flags(cli.commit, cli.dry_run);
    let settings = ImportSettings {
        mode,
        progress_every: merged.progress_every,
        ..ImportSettings::default()
    };
    let store_dir = merged
        .store
        .collection_dir(&account.project_id)
        .context("invalid store location")?;
    let store = FsAssetStore::new(store_dir);
    info!(
        project_id = account.project_id.as_str(),
        store = store.root().as_str(),
        "opened asset store"
    );

    println!("{}", render_mode_line(mode));

    let source = FileRowSource::new(input);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let report = runtime.block_on(run_import(&settings, &source, &store))?;

    print!("{}", render_summary(&report));

    if let Some(path) = &merged.report {
        write_report(&report, path, &FsWritePort)
            .with_context(|| format!("write report {}", path))?;
        info!(path = path.as_str(), "wrote report");
    }

    Ok(())
}
