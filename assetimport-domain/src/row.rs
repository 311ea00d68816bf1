use assetimport_types::CellValue;
use std::collections::HashMap;

/// One input row with case-insensitive column lookup.
///
/// Every header is indexed twice: trimmed as written, and lower-cased. A
/// later column with the same key replaces an earlier one. Headers that are
/// blank after trimming are not indexed but still show up in
/// [`Row::columns`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<CellValue>,
    index: HashMap<String, usize>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let mut row = Row::new();
        for (k, v) in pairs {
            row.push(k, v);
        }
        row
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        let pos = self.values.len();
        self.values.push(value.into());

        let key = column.trim();
        if !key.is_empty() {
            self.index.insert(key.to_string(), pos);
            self.index.insert(key.to_lowercase(), pos);
        }
        self.columns.push(column);
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.index.get(key).map(|&pos| &self.values[pos])
    }

    /// Original header names, in input order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First alias present with a non-blank value.
    pub fn first_value(&self, aliases: &[&str]) -> Option<&CellValue> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|v| !v.is_blank())
    }

    /// Comma-separated header names for diagnostics, truncated to `limit`.
    pub fn column_preview(&self, limit: usize) -> String {
        let mut preview = self
            .columns
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if self.columns.len() > limit {
            preview.push_str(" ...");
        }
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_on_lowercase_alias() {
        let row = Row::from_pairs([("Asset_ID", "A1")]);
        assert_eq!(row.get("asset_id"), Some(&CellValue::from("A1")));
        assert_eq!(row.get("Asset_ID"), Some(&CellValue::from("A1")));
        assert_eq!(row.get("ASSET_ID"), None);
    }

    #[test]
    fn header_whitespace_is_trimmed_for_lookup() {
        let row = Row::from_pairs([("  price ", "10")]);
        assert_eq!(row.get("price"), Some(&CellValue::from("10")));
        assert_eq!(row.columns(), ["  price ".to_string()]);
    }

    #[test]
    fn blank_headers_are_not_indexed() {
        let row = Row::from_pairs([("  ", "x")]);
        assert_eq!(row.get(""), None);
        assert_eq!(row.columns().len(), 1);
    }

    #[test]
    fn first_value_skips_blank_cells() {
        let row = Row::from_pairs([("asset_name", "  "), ("name_asset", "Desk")]);
        assert_eq!(
            row.first_value(&["asset_name", "name_asset"]),
            Some(&CellValue::from("Desk"))
        );
    }

    #[test]
    fn preview_truncates_after_limit() {
        let row = Row::from_pairs((0..14).map(|i| (format!("c{i}"), "")));
        let preview = row.column_preview(12);
        assert!(preview.starts_with("c0, c1, "));
        assert!(preview.ends_with("c11 ..."));

        let short = Row::from_pairs([("a", ""), ("b", "")]);
        assert_eq!(short.column_preview(12), "a, b");
    }
}
