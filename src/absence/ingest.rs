//! Turns resolved raw rows into either leave records or, for legacy monthly
//! inputs, ready-made tallies.

use tracing::debug;

use crate::absence::coerce;
use crate::absence::diagnostics::{Diagnostics, SkipReason};
use crate::absence::filter::AbsenceFilter;
use crate::absence::model::{Cell, Employee, LeaveRecord, MonthlyTally, RawTable};
use crate::absence::resolve::{LeaveColumns, MonthlyColumns, ResolvedColumns};

/// Normalised content of one input table.
#[derive(Debug, Clone, PartialEq)]
pub enum Ingested {
    /// Allow-listed leave records, expanded into daily events on demand.
    Records(Vec<LeaveRecord>),
    /// Tallies read directly from a legacy monthly table, one per input row.
    Tallies(Vec<MonthlyTally>),
}

/// Ingests `table` according to its resolved layout.
pub fn ingest(
    table: &RawTable,
    columns: &ResolvedColumns,
    filter: &AbsenceFilter,
    max_quota_days: u32,
    diagnostics: &mut Diagnostics,
) -> Ingested {
    match columns {
        ResolvedColumns::LeaveRecords(columns) => Ingested::Records(leave_records(
            table,
            columns,
            filter,
            max_quota_days,
            diagnostics,
        )),
        ResolvedColumns::MonthlyTotals(columns) => {
            Ingested::Tallies(monthly_rows(table, columns, diagnostics))
        }
    }
}

/// Reads allow-listed leave records. Rows outside the allow-list are dropped
/// without a diagnostic; rows with an unusable start date are reported and
/// skipped. Quotas above `max_quota_days` are reported and counted as 0.
pub fn leave_records(
    table: &RawTable,
    columns: &LeaveColumns,
    filter: &AbsenceFilter,
    max_quota_days: u32,
    diagnostics: &mut Diagnostics,
) -> Vec<LeaveRecord> {
    let mut records = Vec::new();
    let mut excluded = 0usize;

    for (index, row) in table.rows.iter().enumerate() {
        if row.iter().all(Cell::is_blank) {
            continue;
        }
        if !filter.retains(row, columns.absence_type) {
            excluded += 1;
            continue;
        }

        let row_number = RawTable::row_number(index);
        let quota_cell = RawTable::cell(row, columns.quota_days);
        let quota_days = match coerce::day_count(quota_cell) {
            Some(days) if days <= max_quota_days => days,
            Some(days) => {
                diagnostics.skipped_row(
                    row_number,
                    SkipReason::QuotaDaysTooLarge {
                        value: days,
                        limit: max_quota_days,
                    },
                );
                0
            }
            None => {
                diagnostics.skipped_row(
                    row_number,
                    SkipReason::InvalidQuotaDays {
                        value: quota_cell.to_text(),
                    },
                );
                0
            }
        };

        let start_cell = RawTable::cell(row, columns.leave_start_date);
        let Some(start) = coerce::start_date(start_cell) else {
            diagnostics.skipped_row(
                row_number,
                SkipReason::InvalidStartDate {
                    value: start_cell.to_text().trim().to_string(),
                },
            );
            continue;
        };

        records.push(LeaveRecord {
            row: row_number,
            employee: Employee::new(
                coerce::employee_id(RawTable::cell(row, columns.employee_id)),
                text(row, columns.employee_name),
                text(row, columns.org_unit),
            ),
            start,
            quota_days,
        });
    }

    debug!(
        retained = records.len(),
        excluded, "filtered leave records by absence type"
    );
    records
}

/// Reads every non-blank row of a legacy monthly table as a tally.
/// Non-numeric month cells count as zero and are reported.
pub fn monthly_rows(
    table: &RawTable,
    columns: &MonthlyColumns,
    diagnostics: &mut Diagnostics,
) -> Vec<MonthlyTally> {
    let mut tallies = Vec::new();

    for (index, row) in table.rows.iter().enumerate() {
        if row.iter().all(Cell::is_blank) {
            continue;
        }

        let row_number = RawTable::row_number(index);
        let employee = Employee::new(
            coerce::employee_id(RawTable::cell(row, columns.employee_id)),
            columns
                .employee_name
                .map(|column| text(row, column))
                .unwrap_or_default(),
            columns
                .org_unit
                .map(|column| text(row, column))
                .unwrap_or_default(),
        );

        let mut tally = MonthlyTally::empty(employee);
        for (month, column) in columns.months.iter().enumerate() {
            let cell = RawTable::cell(row, *column);
            tally.months[month] = coerce::day_count(cell).unwrap_or_else(|| {
                diagnostics.skipped_row(
                    row_number,
                    SkipReason::InvalidMonthValue {
                        month: month + 1,
                        value: cell.to_text(),
                    },
                );
                0
            });
        }
        tallies.push(tally);
    }

    tallies
}

fn text(row: &[Cell], column: usize) -> String {
    RawTable::cell(row, column).to_text().trim().to_string()
}
