use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use absence_tools::SummaryError;
use absence_tools::config::{MonthLabels, SummaryConfig, WindowMode};
use absence_tools::io::{self, csv_read, excel_write};
use absence_tools::report::{self, summarize};
use absence_tools::resolve::InputShape;
use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use tempfile::tempdir;

fn calendar_config() -> SummaryConfig {
    SummaryConfig {
        window_mode: WindowMode::Calendar,
        month_labels: MonthLabels::Numeric,
        as_of: NaiveDate::from_ymd_opt(2024, 12, 31),
        ..SummaryConfig::default()
    }
}

fn write_leave_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Leave Data").expect("sheet named");

    let headers = [
        "Personnel No.",
        "Name",
        "Org Unit",
        "Leave From",
        "Quota Days",
        "Absence Type",
    ];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .expect("header written");
    }

    worksheet.write_number(1, 0, 101).expect("id written");
    worksheet.write_string(1, 1, "Alice").expect("name written");
    worksheet.write_string(1, 2, "Ops").expect("org written");
    worksheet
        .write_number_with_format(1, 3, 45570, &date_format)
        .expect("date written");
    worksheet.write_number(1, 4, 3).expect("quota written");
    worksheet
        .write_string(1, 5, "Sick Leave")
        .expect("type written");

    worksheet.write_string(2, 0, "202").expect("id written");
    worksheet.write_string(2, 1, "Bob").expect("name written");
    worksheet.write_string(2, 2, "Finance").expect("org written");
    worksheet
        .write_string(2, 3, "2024-01-10")
        .expect("date written");
    worksheet.write_number(2, 4, 2).expect("quota written");
    worksheet.write_string(2, 5, "Absent").expect("type written");

    worksheet.write_number(3, 0, 303).expect("id written");
    worksheet.write_string(3, 1, "Cara").expect("name written");
    worksheet.write_string(3, 2, "HR").expect("org written");
    worksheet
        .write_string(3, 3, "2024-02-01")
        .expect("date written");
    worksheet.write_number(3, 4, 10).expect("quota written");
    worksheet
        .write_string(3, 5, "Annual Leave")
        .expect("type written");

    workbook.save(path).expect("input workbook saved");
}

fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("summary workbook opened");
    let range = workbook
        .worksheet_range(sheet)
        .expect("summary sheet present")
        .expect("summary sheet read");
    range.rows().map(|row| row.to_vec()).collect()
}

#[test]
fn leave_workbook_produces_summary_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("leave.xlsx");
    let output = temp_dir.path().join("Absence_Summary.xlsx");
    write_leave_workbook(&input);

    let report =
        report::summarize_file(&input, &output, &calendar_config()).expect("summary written");
    assert_eq!(report.shape, InputShape::LeaveRecords);
    assert_eq!(report.summary.len(), 2);

    let rows = read_sheet(&output, "Absence Summary");
    assert_eq!(rows.len(), 3);

    let mut expected_headers = vec![
        "Staff ID".to_string(),
        "Name".to_string(),
        "Org Unit".to_string(),
    ];
    expected_headers.extend((1..=12).map(|month| month.to_string()));
    expected_headers.extend([
        "Grand Total".to_string(),
        "Absence Days (Last 3 Months)".to_string(),
        "Absence Days (Last 6 Months)".to_string(),
    ]);
    let headers: Vec<String> = rows[0].iter().map(|cell| cell.to_string()).collect();
    assert_eq!(headers, expected_headers);

    let alice = &rows[1];
    assert_eq!(alice[0], DataType::Float(101.0));
    assert_eq!(alice[1], DataType::String("Alice".to_string()));
    assert_eq!(alice[2], DataType::String("Ops".to_string()));
    assert_eq!(alice[3 + 9], DataType::Float(3.0));
    assert_eq!(alice[3], DataType::Float(0.0));
    assert_eq!(alice[15], DataType::Float(3.0));
    assert_eq!(alice[16], DataType::Float(3.0));
    assert_eq!(alice[17], DataType::Float(3.0));

    let bob = &rows[2];
    assert_eq!(bob[0], DataType::Float(202.0));
    assert_eq!(bob[3], DataType::Float(2.0));
    assert_eq!(bob[15], DataType::Float(2.0));
    assert_eq!(bob[16], DataType::Float(0.0));
    assert_eq!(bob[17], DataType::Float(0.0));
}

#[test]
fn named_sheet_is_read_when_configured() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("leave.xlsx");
    write_leave_workbook(&input);

    let table = io::read_table(&input, Some("Leave Data")).expect("sheet read");
    assert_eq!(table.headers[0], "Personnel No.");
    assert_eq!(table.rows.len(), 3);

    let error = io::read_table(&input, Some("Missing")).expect_err("missing sheet");
    assert!(matches!(error, SummaryError::InvalidWorkbook(_)));
}

#[test]
fn schema_error_writes_no_output() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("leave.csv");
    let output = temp_dir.path().join("Absence_Summary.xlsx");
    fs::write(
        &input,
        "Personnel No.,Name,Org Unit,Quota Days,Absence Type\n101,Alice,Ops,3,Sick Leave\n",
    )
    .expect("CSV written");

    let error = report::summarize_file(&input, &output, &calendar_config())
        .expect_err("schema error");

    assert!(error.to_string().contains("leave_start_date"));
    assert!(!output.exists());
}

#[test]
fn csv_input_is_summarised() {
    let data = "\u{feff}Personnel No.,Name,Org Unit,Leave From,Quota Days,Absence Type\n\
                101, Alice ,Ops,2024-10-05,3,Sick Leave\n\
                101,Alice,Ops,31/12/2024,2,Absent Without Leave\n\
                ,,,,,\n\
                202,Bob,Finance,2024-07-01,x,Absent\n";
    let table = csv_read::read_table_from(data.as_bytes()).expect("CSV parsed");
    assert_eq!(table.headers[0], "Personnel No.");

    let report = summarize(
        &table,
        &calendar_config(),
        NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
    )
    .expect("summary computed");

    assert_eq!(report.summary.len(), 1);
    let alice = report.summary.row(101).expect("row for 101");
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.month(10), 3);
    assert_eq!(alice.month(12), 1);
    assert_eq!(alice.month(1), 1);
    assert_eq!(alice.grand_total, 5);
    assert_eq!(report.diagnostics.skipped_rows(), 1);
}

#[test]
fn diagnostics_report_is_written_as_json() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("leave.csv");
    let output = temp_dir.path().join("summary.xlsx");
    let diagnostics = temp_dir.path().join("diagnostics.json");
    fs::write(
        &input,
        "Personnel No.,Name,Org Unit,Leave From,Quota Days,Absence Type\n\
         101,Alice,Ops,someday,3,Sick Leave\n\
         102,Ben,Ops,2024-03-01,1,Absent\n",
    )
    .expect("CSV written");

    let report =
        report::summarize_file(&input, &output, &calendar_config()).expect("summary written");
    report
        .write_diagnostics(&diagnostics)
        .expect("diagnostics written");

    let written = fs::read_to_string(&diagnostics).expect("diagnostics read");
    let parsed: serde_json::Value = serde_json::from_str(&written).expect("JSON parsed");
    assert_eq!(parsed["as_of"], "2024-12-31");
    assert_eq!(parsed["input_shape"], "leave-records");
    assert_eq!(parsed["window_mode"], "calendar");
    assert_eq!(parsed["summary_rows"], 1);
    assert_eq!(parsed["skipped_rows"], 1);
    assert_eq!(parsed["diagnostics"][0]["kind"], "skipped-row");
    assert_eq!(parsed["diagnostics"][0]["reason"], "invalid-start-date");
    assert_eq!(parsed["diagnostics"][0]["row"], 2);
    assert_eq!(parsed["diagnostics"][0]["value"], "someday");
}

#[test]
fn empty_summary_still_has_a_header_row() {
    let temp_dir = tempdir().expect("temporary directory");
    let output = temp_dir.path().join("empty.xlsx");
    let table = csv_read::read_table_from(
        "Personnel No.,Name,Org Unit,Leave From,Quota Days,Absence Type\n".as_bytes(),
    )
    .expect("CSV parsed");
    let config = SummaryConfig {
        output_sheet: "Summary".to_string(),
        ..calendar_config()
    };
    let report = summarize(
        &table,
        &config,
        NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
    )
    .expect("summary computed");

    excel_write::write_summary(&output, &report.summary, &config.output_sheet, report.as_of)
        .expect("summary written");

    let rows = read_sheet(&output, "Summary");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], DataType::String("Staff ID".to_string()));
    assert_eq!(rows[0][3], DataType::String("1".to_string()));
}

#[test]
fn identical_runs_export_identical_bytes() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("leave.xlsx");
    let first_output = temp_dir.path().join("first.xlsx");
    let second_output = temp_dir.path().join("second.xlsx");
    write_leave_workbook(&input);
    let config = calendar_config();

    let report = report::summarize_file(&input, &first_output, &config).expect("first run");
    let buffer =
        excel_write::summary_to_buffer(&report.summary, &config.output_sheet, report.as_of)
            .expect("summary rendered");

    thread::sleep(Duration::from_millis(1100));
    report::summarize_file(&input, &second_output, &config).expect("second run");
    let rerendered =
        excel_write::summary_to_buffer(&report.summary, &config.output_sheet, report.as_of)
            .expect("summary rendered again");

    let first = fs::read(&first_output).expect("first output read");
    let second = fs::read(&second_output).expect("second output read");
    assert_eq!(first, second, "export bytes differ between runs on identical input");
    assert_eq!(buffer, rerendered);
    assert_eq!(buffer, first);
}

#[test]
fn unsupported_extensions_are_rejected() {
    let error = io::read_table(Path::new("leave.json"), None).expect_err("unsupported");
    assert!(matches!(error, SummaryError::UnsupportedInput(_)));
}
