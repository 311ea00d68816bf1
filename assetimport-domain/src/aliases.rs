//! Accepted source columns per canonical field, highest priority first.
//!
//! Lookups are exact against the row index, which holds every header both
//! as written (trimmed) and lower-cased, so `Asset_ID` matches `asset_id`.

pub const ASSET_ID: &[&str] = &["asset_id", "id", "รหัสครุภัณฑ์", "หมายเลขครุภัณฑ์"];

pub const ASSET_NAME: &[&str] = &["asset_name", "name_asset", "ชื่อสินทรัพย์", "ชื่อครุภัณฑ์"];

pub const ASSET_TYPE: &[&str] = &["asset_type", "type"];

pub const LOCATION_ID: &[&str] = &["location_id"];

pub const LOCATION_NAME: &[&str] = &["location_name", "สถานที่", "สถานที่ (ลายมือ)"];

/// Columns copied into the record's `permanent_id` field.
pub const PERMANENT_ID: &[&str] = &["permanent_id", "หมายเลขสินทรัพย์ถาวร", "permanent", "permanent_no"];

/// Columns that may seed a generated `asset_id`. Narrower than
/// [`PERMANENT_ID`]: the loose `permanent`/`permanent_no` headers are kept
/// as data but never used to mint keys.
pub const IDENTIFIER_BASE: &[&str] = &["permanent_id", "หมายเลขสินทรัพย์ถาวร"];

pub const PRICE: &[&str] = &["price", "มูลค่า (บาท)", "มูลค่า", "ราคา"];

pub const PURCHASE_AT: &[&str] = &["purchase_at", "วันที่ซื้อ", "purchase_date"];
