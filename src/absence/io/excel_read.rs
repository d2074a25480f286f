use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::absence::coerce;
use crate::absence::error::{Result, SummaryError};
use crate::absence::model::{Cell, RawTable};

/// Reads one worksheet of an Excel workbook as a raw table. The first row of
/// the used range holds the header labels. When `sheet` is `None` the first
/// worksheet is read.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SummaryError::InvalidWorkbook("workbook has no worksheets".into()))?,
    };

    let range = read_required_sheet(&mut workbook, &sheet_name)?;
    let table = range_to_table(&range);
    debug!(
        sheet = %sheet_name,
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read worksheet"
    );
    Ok(table)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| SummaryError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(SummaryError::from)?;
    Ok(range)
}

fn range_to_table(range: &calamine::Range<DataType>) -> RawTable {
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_string(Some(cell)).trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let rows = rows
        .map(|row| row.iter().map(cell_to_cell).collect())
        .collect();

    RawTable::new(headers, rows)
}

fn cell_to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::DateTime(serial) => coerce::excel_serial_to_date(*serial)
            .map(Cell::Date)
            .unwrap_or(Cell::Number(*serial)),
        other => Cell::Text(other.to_string()),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
