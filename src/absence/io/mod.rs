pub mod csv_read;
pub mod excel_read;
pub mod excel_write;

use std::path::Path;

use crate::absence::error::{Result, SummaryError};
use crate::absence::model::RawTable;

/// Tabular file formats accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Excel,
    Csv,
}

/// Determines the input format from the file extension.
pub fn detect_format(path: &Path) -> Result<InputFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" => Ok(InputFormat::Excel),
        "csv" => Ok(InputFormat::Csv),
        _ => Err(SummaryError::UnsupportedInput(path.display().to_string())),
    }
}

/// Reads the input table, dispatching on the file extension. `sheet` only
/// applies to workbooks.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    match detect_format(path)? {
        InputFormat::Excel => excel_read::read_table(path, sheet),
        InputFormat::Csv => csv_read::read_table(path),
    }
}
