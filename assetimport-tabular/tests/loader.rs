//! Tests for CSV and spreadsheet row loading.

use assetimport_domain::normalize_row;
use assetimport_tabular::{LoadError, load_rows, read_csv};
use assetimport_types::CellValue;
use camino::Utf8PathBuf;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn write_input(temp: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(temp.path().join(name)).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn csv_rows_keep_file_order() {
    let rows = read_csv("asset_id,price\nA1,\"1,200\"\nA2,500\n".as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("asset_id"), Some(&CellValue::from("A1")));
    assert_eq!(rows[0].get("price"), Some(&CellValue::from("1,200")));
    assert_eq!(rows[1].get("asset_id"), Some(&CellValue::from("A2")));
}

#[test]
fn csv_trims_headers_and_cells() {
    let rows = read_csv(" Asset_ID , Price \n  A1  , 10 \n".as_bytes()).unwrap();
    assert_eq!(rows[0].get("asset_id"), Some(&CellValue::from("A1")));
    assert_eq!(rows[0].get("price"), Some(&CellValue::from("10")));
}

#[test]
fn csv_skips_blank_lines() {
    let rows = read_csv("asset_id\nA1\n\n\nA2\n".as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
}

#[test]
fn csv_strips_byte_order_mark() {
    let rows = read_csv("\u{feff}asset_id,asset_name\nA1,Desk\n".as_bytes()).unwrap();
    assert_eq!(rows[0].get("asset_id"), Some(&CellValue::from("A1")));
}

#[test]
fn csv_pads_short_records() {
    let rows = read_csv("asset_id,asset_name,price\nA1,Desk\n".as_bytes()).unwrap();
    assert_eq!(rows[0].get("price"), Some(&CellValue::Empty));
    assert_eq!(rows[0].columns().len(), 3);
}

#[test]
fn csv_reads_thai_headers() {
    let rows = read_csv("ชื่อครุภัณฑ์,หมายเลขสินทรัพย์ถาวร\nโต๊ะ,P-1\n".as_bytes()).unwrap();
    assert_eq!(rows[0].get("ชื่อครุภัณฑ์"), Some(&CellValue::from("โต๊ะ")));
    assert_eq!(
        rows[0].get("หมายเลขสินทรัพย์ถาวร"),
        Some(&CellValue::from("P-1"))
    );
}

#[test]
fn header_only_csv_has_no_rows() {
    let rows = read_csv("asset_id,price\n".as_bytes()).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn load_rows_reads_csv_files() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_input(&temp, "assets.csv", "asset_id\nA1\n");
    let rows = load_rows(&path).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn load_rows_reports_missing_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().join("missing.csv")).unwrap();
    assert!(matches!(load_rows(&path), Err(LoadError::Io(_))));
}

#[test]
fn corrupt_workbook_is_a_spreadsheet_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_input(&temp, "assets.xlsx", "not a zip archive");
    let err = load_rows(&path).unwrap_err();
    assert!(matches!(err, LoadError::Spreadsheet(_)), "got {err:?}");
}

fn fixture(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn workbook_reads_first_sheet_with_header_row() {
    let rows = load_rows(&fixture("assets.xlsx")).unwrap();

    // The gap row is dropped and the second sheet is never read.
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.get("note").is_none()));
    assert_eq!(
        rows[0].columns(),
        &["asset_id", "ชื่อครุภัณฑ์", "วันที่ซื้อ", "price"]
    );
    assert_eq!(rows[0].get("asset_id"), Some(&CellValue::from("A1")));
    assert_eq!(rows[0].get("ชื่อครุภัณฑ์"), Some(&CellValue::from("Desk")));
    assert_eq!(rows[0].get("price"), Some(&CellValue::Float(1200.0)));
}

#[test]
fn workbook_date_cells_become_datetimes() {
    let rows = load_rows(&fixture("assets.xlsx")).unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(rows[0].get("วันที่ซื้อ"), Some(&CellValue::DateTime(expected)));

    let normalized = normalize_row(&rows[0]);
    assert_eq!(
        normalized.payload.purchase_at,
        Some(expected.and_utc())
    );
}

#[test]
fn workbook_short_rows_are_padded_with_empty_cells() {
    let rows = load_rows(&fixture("assets.xlsx")).unwrap();
    assert_eq!(rows[1].get("asset_id"), Some(&CellValue::from("A2")));
    assert_eq!(rows[1].get("วันที่ซื้อ"), Some(&CellValue::Empty));
    assert_eq!(rows[1].get("price"), Some(&CellValue::Empty));
    assert_eq!(rows[1].columns().len(), 4);
}
