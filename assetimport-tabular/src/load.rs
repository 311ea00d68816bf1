use assetimport_domain::Row;
use assetimport_types::CellValue;
use calamine::{Data, DataType, Reader, open_workbook_auto};
use camino::Utf8Path;
use fs_err as fs;
use std::io::Read;
use thiserror::Error;
use tracing::debug;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Spreadsheet,
}

impl InputFormat {
    /// Spreadsheet for known workbook extensions, CSV for anything else.
    pub fn from_path(path: &Utf8Path) -> Self {
        let is_sheet = path
            .extension()
            .map(|ext| ext.to_ascii_lowercase())
            .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()));
        if is_sheet {
            InputFormat::Spreadsheet
        } else {
            InputFormat::Csv
        }
    }
}

/// Load every data row of `path`. Spreadsheets use their first sheet.
pub fn load_rows(path: &Utf8Path) -> Result<Vec<Row>, LoadError> {
    let format = InputFormat::from_path(path);
    debug!(path = %path, ?format, "loading rows");
    match format {
        InputFormat::Csv => read_csv(fs::File::open(path)?),
        InputFormat::Spreadsheet => load_spreadsheet(path),
    }
}

/// Parse CSV with a header row. Cells are trimmed, blank lines skipped and a
/// leading UTF-8 byte order mark ignored.
pub fn read_csv<R: Read>(mut reader: R) -> Result<Vec<Row>, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.len() <= 1 && record.get(0).is_none_or(str::is_empty) {
            continue;
        }
        let mut row = Row::new();
        for (i, header) in headers.iter().enumerate() {
            let value = match record.get(i) {
                Some(v) if !v.is_empty() => CellValue::Text(v.to_string()),
                _ => CellValue::Empty,
            };
            row.push(header.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}

fn load_spreadsheet(path: &Utf8Path) -> Result<Vec<Row>, LoadError> {
    let mut workbook = open_workbook_auto(path.as_std_path())?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        debug!(path = %path, "workbook has no sheets");
        return Ok(vec![]);
    };
    let range = workbook.worksheet_range(&sheet)?;

    let mut cells = range.rows();
    let Some(header_cells) = cells.next() else {
        return Ok(vec![]);
    };
    let headers: Vec<String> = header_cells.iter().map(|c| c.to_string()).collect();

    let mut rows = Vec::new();
    for record in cells {
        if record.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let mut row = Row::new();
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).map(cell_value).unwrap_or(CellValue::Empty);
            row.push(header.clone(), value);
        }
        rows.push(row);
    }
    debug!(path = %path, sheet = %sheet, rows = rows.len(), "loaded spreadsheet");
    Ok(rows)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(cell.to_string())),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            InputFormat::from_path(Utf8Path::new("a/assets.xlsx")),
            InputFormat::Spreadsheet
        );
        assert_eq!(
            InputFormat::from_path(Utf8Path::new("ASSETS.XLS")),
            InputFormat::Spreadsheet
        );
        assert_eq!(
            InputFormat::from_path(Utf8Path::new("assets.csv")),
            InputFormat::Csv
        );
        assert_eq!(
            InputFormat::from_path(Utf8Path::new("assets")),
            InputFormat::Csv
        );
    }

    #[test]
    fn spreadsheet_cells_map_to_cell_values() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(cell_value(&Data::Float(12.5)), CellValue::Float(12.5));
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Int(7));
        assert_eq!(
            cell_value(&Data::String("Desk".to_string())),
            CellValue::Text("Desk".to_string())
        );
    }
}
