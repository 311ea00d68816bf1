//! Import pipeline, extracted from the CLI.
//!
//! The entry points are I/O-agnostic: rows come from a [`RowSource`], the
//! asset collection sits behind an [`AssetStore`], and report files go
//! through a [`WritePort`].

use crate::ports::{AssetStore, RowSource, WritePort};
use crate::settings::ImportSettings;
use anyhow::Context;
use assetimport_domain::{
    DuplicateReason, Resolution, Row, RunState, normalize_row, resolve_asset_id,
};
use assetimport_render::render_report_md;
use assetimport_types::{AssetRecord, ImportReport, RowOutcome};
use camino::Utf8Path;
use chrono::Utc;
use tracing::{debug, error, info, warn};

/// Normalize, resolve and (unless dry-run) persist every row in order.
///
/// Per-row problems are classified into the report and never abort the
/// run. Only a failure to load the input is returned as an error.
pub async fn run_import(
    settings: &ImportSettings,
    source: &dyn RowSource,
    store: &dyn AssetStore,
) -> anyhow::Result<ImportReport> {
    let rows = source.load_rows()?;

    let mut report = ImportReport::new(settings.mode, source.describe());
    report.input_sha256 = source.sha256()?;
    report.summary.rows = rows.len() as u64;
    info!(rows = rows.len(), mode = %settings.mode, input = report.input.as_str(), "starting import");

    let mut state = RunState::new();
    for (idx, row) in rows.iter().enumerate() {
        let outcome = import_row(settings, &mut state, idx + 1, row, store).await;
        report.push(outcome);

        let processed = report.summary.processed();
        if settings.progress_every > 0 && processed % settings.progress_every as u64 == 0 {
            info!(
                processed,
                total = report.summary.rows,
                imported = report.summary.imported,
                duplicates = report.summary.duplicates,
                errors = report.summary.errors,
                "progress"
            );
        }
    }

    report.ended_at = Utc::now();
    info!(
        imported = report.summary.imported,
        duplicates = report.summary.duplicates,
        errors = report.summary.errors,
        claimed = state.claimed_count(),
        "import finished"
    );
    Ok(report)
}

async fn import_row(
    settings: &ImportSettings,
    state: &mut RunState,
    row_no: usize,
    row: &Row,
    store: &dyn AssetStore,
) -> RowOutcome {
    let normalized = normalize_row(row);

    let resolution = match resolve_asset_id(
        state,
        row,
        normalized.permanent_id.as_deref(),
        store,
    )
    .await
    {
        Ok(resolution) => resolution,
        Err(err) => {
            error!(row = row_no, asset_id = err.asset_id.as_str(), error = %err.source, "lookup failed");
            let message = format!("failed asset_id={}: {}", err.asset_id, err.source);
            return RowOutcome::error(row_no, Some(err.asset_id), message);
        }
    };

    match resolution {
        Resolution::MissingId => {
            let columns = row.column_preview(settings.preview_columns);
            error!(row = row_no, columns = columns.as_str(), "missing asset_id");
            RowOutcome::error(
                row_no,
                None,
                format!("missing asset_id. Available columns: {columns}"),
            )
        }
        Resolution::Duplicate { asset_id, reason } => {
            let message = match &reason {
                DuplicateReason::Exists => format!("duplicate asset_id={asset_id}"),
                DuplicateReason::NoFreeSuffix { base } => {
                    format!("no free suffix for permanent_id={base}")
                }
            };
            warn!(row = row_no, asset_id = asset_id.as_str(), "{message}");
            RowOutcome::duplicate(row_no, asset_id, message)
        }
        Resolution::Import { asset_id, origin } => {
            debug!(row = row_no, asset_id = asset_id.as_str(), origin = ?origin, "resolved");
            if settings.mode.is_dry_run() {
                return RowOutcome::imported(row_no, asset_id);
            }

            let record = AssetRecord::new(asset_id.clone(), normalized.payload);
            match store.set(record).await {
                Ok(_) => RowOutcome::imported(row_no, asset_id),
                Err(err) => {
                    error!(row = row_no, asset_id = asset_id.as_str(), error = %err, "write failed");
                    let message = format!("failed asset_id={asset_id}: {err}");
                    RowOutcome::error(row_no, Some(asset_id), message)
                }
            }
        }
    }
}

/// Write `report` as pretty JSON to `path` and its markdown rendering next
/// to it (same stem, `.md` extension).
pub fn write_report(
    report: &ImportReport,
    path: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    let mut json = serde_json::to_vec_pretty(report).context("serialize report")?;
    json.push(b'\n');
    writer.write_file(path, &json)?;

    let md_path = path.with_extension("md");
    writer.write_file(&md_path, render_report_md(report).as_bytes())?;

    debug!(json = path.as_str(), markdown = md_path.as_str(), "wrote report");
    Ok(())
}
