//! Field normalizer: raw cells → typed payload fields.

use crate::aliases;
use crate::row::Row;
use assetimport_types::{AssetPayload, CellValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Output of [`normalize_row`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub payload: AssetPayload,
    /// Identifier base for rows without an explicit `asset_id`.
    pub permanent_id: Option<String>,
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Build the payload for one row. Only resolved fields are set;
/// `asset_status` falls back to its default.
pub fn normalize_row(row: &Row) -> NormalizedRow {
    let mut payload = AssetPayload::default();

    if let Some(name) = string_field(row, aliases::ASSET_NAME) {
        payload.set_asset_name(name);
    }
    if let Some(kind) = string_field(row, aliases::ASSET_TYPE) {
        payload.set_asset_type(kind);
    }
    payload.location_id = string_field(row, aliases::LOCATION_ID);
    payload.location_name = string_field(row, aliases::LOCATION_NAME);
    payload.permanent_id = string_field(row, aliases::PERMANENT_ID);
    payload.price = row.first_value(aliases::PRICE).and_then(parse_number);
    payload.purchase_at = row
        .first_value(aliases::PURCHASE_AT)
        .and_then(parse_timestamp);

    let permanent_id = string_field(row, aliases::IDENTIFIER_BASE);
    if payload.permanent_id.is_none() {
        payload.permanent_id = permanent_id.clone();
    }

    NormalizedRow {
        payload,
        permanent_id,
    }
}

fn string_field(row: &Row, aliases: &[&str]) -> Option<String> {
    row.first_value(aliases).and_then(normalize_string)
}

/// Trimmed text of a cell; blank becomes `None`.
pub fn normalize_string(value: &CellValue) -> Option<String> {
    let text = value.as_text()?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Finite number from a numeric cell or a text cell with optional
/// thousands separators (`"1,200.50"`).
pub fn parse_number(value: &CellValue) -> Option<f64> {
    let n = match value {
        CellValue::Float(n) => *n,
        CellValue::Int(n) => *n as f64,
        CellValue::Text(_) => {
            let text = normalize_string(value)?;
            text.replace(',', "").trim().parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Timestamp from a date cell or an ISO 8601 / `YYYY-MM-DD` string.
///
/// Strings without an offset are read as UTC; bare dates are UTC midnight.
pub fn parse_timestamp(value: &CellValue) -> Option<DateTime<Utc>> {
    match value {
        CellValue::DateTime(dt) => Some(dt.and_utc()),
        CellValue::Text(_) => parse_timestamp_str(&normalize_string(value)?),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
