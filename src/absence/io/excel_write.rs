use std::path::Path;

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, FormatBorder, Workbook};

use crate::absence::error::Result;
use crate::absence::summary::SummaryTable;

const TEXT_COLUMNS: u16 = 3;

/// Writes the summary as a single flat worksheet: header labels in the first
/// row, one row per employee below, no merged cells.
///
/// The workbook's creation date is stamped with `as_of`, so the same summary
/// always produces the same bytes.
pub fn write_summary(
    path: &Path,
    summary: &SummaryTable,
    sheet_name: &str,
    as_of: NaiveDate,
) -> Result<()> {
    let mut workbook = build_workbook(summary, sheet_name, as_of)?;
    workbook.save(path)?;
    Ok(())
}

/// Renders the summary workbook into memory, for callers that stream the
/// export instead of writing a file.
pub fn summary_to_buffer(
    summary: &SummaryTable,
    sheet_name: &str,
    as_of: NaiveDate,
) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(summary, sheet_name, as_of)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(
    summary: &SummaryTable,
    sheet_name: &str,
    as_of: NaiveDate,
) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let properties = DocProperties::new().set_creation_datetime(&creation_date(as_of)?);
    workbook.set_properties(&properties);
    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let headers = summary.headers();
    for (col_idx, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, header, &header_format)?;
    }

    for (row_idx, row) in summary.rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        worksheet.write_number(excel_row, 0, row.staff_id as f64)?;
        worksheet.write_string(excel_row, 1, &row.name)?;
        worksheet.write_string(excel_row, 2, &row.org_unit)?;

        let counts = row
            .months
            .iter()
            .copied()
            .map(u64::from)
            .chain([row.grand_total, row.last_3_months, row.last_6_months]);
        for (offset, value) in counts.enumerate() {
            worksheet.write_number(excel_row, TEXT_COLUMNS + offset as u16, value as f64)?;
        }
    }

    let col_end = (headers.len() as u16).saturating_sub(1);
    if !summary.rows.is_empty() {
        worksheet.autofilter(0, 0, summary.rows.len() as u32, col_end)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    worksheet.set_column_width(0, 12)?;
    worksheet.set_column_width(1, 30)?;
    worksheet.set_column_width(2, 25)?;
    for col_idx in TEXT_COLUMNS..TEXT_COLUMNS + 12 {
        worksheet.set_column_width(col_idx, 8)?;
    }
    worksheet.set_column_width(col_end - 2, 12)?;
    worksheet.set_column_width(col_end - 1, 30)?;
    worksheet.set_column_width(col_end, 30)?;

    Ok(workbook)
}

/// Midnight UTC of the as-of date. Dates outside Excel's 1900-9999 range fall
/// back to the start of that range.
fn creation_date(as_of: NaiveDate) -> Result<ExcelDateTime> {
    let stamp = u16::try_from(as_of.year()).ok().and_then(|year| {
        ExcelDateTime::from_ymd(year, as_of.month() as u8, as_of.day() as u8).ok()
    });
    match stamp {
        Some(stamp) => Ok(stamp),
        None => Ok(ExcelDateTime::from_ymd(1900, 1, 1)?),
    }
}
