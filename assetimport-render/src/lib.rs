//! Rendering helpers for human-readable run output.

use assetimport_types::{ImportReport, RowStatus, RunMode};

/// Mode banner printed before the first row.
pub fn render_mode_line(mode: RunMode) -> String {
    match mode {
        RunMode::DryRun => "Mode: DRY-RUN (no writes)".to_string(),
        RunMode::Commit => "Mode: COMMIT (writing to the asset store)".to_string(),
    }
}

/// End-of-run summary block for the console.
pub fn render_summary(report: &ImportReport) -> String {
    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&format!("Rows: {}\n", report.summary.rows));
    out.push_str(&format!("Imported: {}\n", report.summary.imported));
    out.push_str(&format!(
        "Duplicates skipped: {}\n",
        report.summary.duplicates
    ));
    out.push_str(&format!("Errors: {}\n", report.summary.errors));
    if report.mode.is_dry_run() {
        out.push_str("Dry-run finished. Re-run with --commit to write into the asset store.\n");
    }
    out
}

pub fn render_report_md(report: &ImportReport) -> String {
    let mut out = String::new();
    out.push_str("# assetimport report\n\n");
    out.push_str(&format!("- Input: `{}`\n", report.input));
    out.push_str(&format!("- Mode: {}\n", report.mode));
    out.push_str(&format!("- Rows: {}\n", report.summary.rows));
    out.push_str(&format!(
        "- Imported: {}\n- Duplicates skipped: {}\n- Errors: {}\n\n",
        report.summary.imported, report.summary.duplicates, report.summary.errors
    ));

    let skipped: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| o.status != RowStatus::Imported)
        .collect();

    out.push_str("## Skipped rows\n\n");
    if skipped.is_empty() {
        out.push_str("_Every row was imported._\n");
        return out;
    }

    out.push_str("| Row | Status | asset_id | Detail |\n");
    out.push_str("|---:|---|---|---|\n");
    for o in skipped {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            o.row,
            status_label(o.status),
            o.asset_id.as_deref().unwrap_or("-"),
            o.message.as_deref().unwrap_or("").replace('|', "\\|"),
        ));
    }
    out
}

fn status_label(s: RowStatus) -> &'static str {
    match s {
        RowStatus::Imported => "imported",
        RowStatus::Duplicate => "duplicate",
        RowStatus::Error => "error",
    }
}
