use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status written when the input does not carry one.
pub const DEFAULT_ASSET_STATUS: i64 = 1;

/// Normalized fields of one input row.
///
/// Only fields with a resolved value are serialized. `name_asset` and `type`
/// are historical spellings of `asset_name` and `asset_type`; readers of the
/// collection still use them, so both keys are always written together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_asset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permanent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_at: Option<DateTime<Utc>>,

    #[serde(default = "default_asset_status")]
    pub asset_status: i64,
}

fn default_asset_status() -> i64 {
    DEFAULT_ASSET_STATUS
}

impl Default for AssetPayload {
    fn default() -> Self {
        Self {
            asset_name: None,
            name_asset: None,
            asset_type: None,
            type_: None,
            location_id: None,
            location_name: None,
            permanent_id: None,
            price: None,
            purchase_at: None,
            asset_status: DEFAULT_ASSET_STATUS,
        }
    }
}

impl AssetPayload {
    pub fn set_asset_name(&mut self, name: String) {
        self.name_asset = Some(name.clone());
        self.asset_name = Some(name);
    }

    pub fn set_asset_type(&mut self, kind: String) {
        self.type_ = Some(kind.clone());
        self.asset_type = Some(kind);
    }
}

/// A stored asset document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_id: String,

    #[serde(flatten)]
    pub payload: AssetPayload,

    /// `None` asks the store to stamp the write time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AssetRecord {
    /// A record whose creation time is assigned by the store on write.
    pub fn new(asset_id: impl Into<String>, payload: AssetPayload) -> Self {
        Self {
            asset_id: asset_id.into(),
            payload,
            created_at: None,
        }
    }
}
