use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Whether writes reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    #[default]
    DryRun,
    Commit,
}

impl RunMode {
    pub fn from_flags(commit: bool, dry_run: bool) -> Self {
        if commit && !dry_run {
            RunMode::Commit
        } else {
            RunMode::DryRun
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::DryRun => write!(f, "DRY-RUN"),
            RunMode::Commit => write!(f, "COMMIT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Imported,
    Duplicate,
    Error,
}

/// What happened to one input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowOutcome {
    /// 1-based position in the input.
    pub row: usize,
    pub status: RowStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RowOutcome {
    pub fn imported(row: usize, asset_id: impl Into<String>) -> Self {
        Self {
            row,
            status: RowStatus::Imported,
            asset_id: Some(asset_id.into()),
            message: None,
        }
    }

    pub fn duplicate(row: usize, asset_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            status: RowStatus::Duplicate,
            asset_id: Some(asset_id.into()),
            message: Some(message.into()),
        }
    }

    pub fn error(row: usize, asset_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            status: RowStatus::Error,
            asset_id,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub rows: u64,
    pub imported: u64,
    pub duplicates: u64,
    pub errors: u64,
}

impl ImportSummary {
    pub fn processed(&self) -> u64 {
        self.imported + self.duplicates + self.errors
    }

    pub fn record(&mut self, status: RowStatus) {
        match status {
            RowStatus::Imported => self.imported += 1,
            RowStatus::Duplicate => self.duplicates += 1,
            RowStatus::Error => self.errors += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub schema: String,
    pub run_id: Uuid,
    pub mode: RunMode,
    pub input: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_sha256: Option<String>,

    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub summary: ImportSummary,

    #[serde(default)]
    pub outcomes: Vec<RowOutcome>,
}

impl ImportReport {
    pub fn new(mode: RunMode, input: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            schema: crate::schema::ASSETIMPORT_REPORT_V1.to_string(),
            run_id: Uuid::new_v4(),
            mode,
            input: input.into(),
            input_sha256: None,
            started_at: now,
            ended_at: now,
            summary: ImportSummary::default(),
            outcomes: vec![],
        }
    }

    pub fn push(&mut self, outcome: RowOutcome) {
        self.summary.record(outcome.status);
        self.outcomes.push(outcome);
    }
}
