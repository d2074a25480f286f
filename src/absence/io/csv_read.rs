use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::absence::error::Result;
use crate::absence::model::{Cell, RawTable};

/// Reads a CSV file whose first record holds the header labels.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path)?;
    read_table_from(file)
}

/// Reads CSV data from any reader. Records may have differing lengths; short
/// records read as blank in their missing columns.
pub fn read_table_from<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(text_cell).collect());
    }

    Ok(RawTable::new(headers, rows))
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(value.to_string())
    }
}
