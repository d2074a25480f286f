//! Orchestration of a summary run, from input table to exported workbook.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::absence::aggregate::monthly_tallies;
use crate::absence::config::{SummaryConfig, WindowMode};
use crate::absence::diagnostics::Diagnostics;
use crate::absence::error::Result;
use crate::absence::expand::expand_all;
use crate::absence::filter::AbsenceFilter;
use crate::absence::ingest::{Ingested, ingest};
use crate::absence::io::{self, excel_write};
use crate::absence::model::RawTable;
use crate::absence::resolve::{InputShape, resolve_columns};
use crate::absence::summary::SummaryTable;
use crate::absence::window::{RollingWindows, calendar_totals};

/// Result of one summary run: the summary table plus everything needed to
/// explain it.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub summary: SummaryTable,
    pub diagnostics: Diagnostics,
    pub shape: InputShape,
    /// Window mode actually applied. Monthly totals inputs always use
    /// calendar windows.
    pub window_mode: WindowMode,
    pub as_of: NaiveDate,
}

#[derive(Serialize)]
struct DiagnosticsDocument<'a> {
    as_of: NaiveDate,
    input_shape: InputShape,
    window_mode: WindowMode,
    summary_rows: usize,
    skipped_rows: usize,
    diagnostics: &'a Diagnostics,
}

impl SummaryReport {
    /// Serialises the diagnostics, with the run parameters, as pretty JSON.
    pub fn diagnostics_json(&self) -> Result<String> {
        let document = DiagnosticsDocument {
            as_of: self.as_of,
            input_shape: self.shape,
            window_mode: self.window_mode,
            summary_rows: self.summary.len(),
            skipped_rows: self.diagnostics.skipped_rows(),
            diagnostics: &self.diagnostics,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Writes [`diagnostics_json`](Self::diagnostics_json) to `path`.
    pub fn write_diagnostics(&self, path: &Path) -> Result<()> {
        fs::write(path, self.diagnostics_json()?)?;
        Ok(())
    }
}

/// The configured as-of date, or the local current date.
pub fn resolve_as_of(config: &SummaryConfig) -> NaiveDate {
    config.as_of.unwrap_or_else(|| Local::now().date_naive())
}

/// Computes the summary for an in-memory table.
///
/// Fails only when the configuration is invalid or the columns cannot be
/// resolved; every other problem is reported through the diagnostics.
pub fn summarize(
    table: &RawTable,
    config: &SummaryConfig,
    as_of: NaiveDate,
) -> Result<SummaryReport> {
    config.validate()?;

    let mut diagnostics = Diagnostics::new();
    let columns = resolve_columns(&table.headers, &config.aliases, &mut diagnostics)?;
    let shape = columns.shape();
    debug!(?shape, "resolved input columns");

    let filter = AbsenceFilter::new(&config.absence_types);
    let ingested = ingest(
        table,
        &columns,
        &filter,
        config.max_quota_days,
        &mut diagnostics,
    );
    let (summary, window_mode) = match ingested {
        Ingested::Records(records) => {
            let day_count: u64 = records
                .iter()
                .map(|record| u64::from(record.quota_days))
                .sum();
            info!(
                record_count = records.len(),
                day_count, "expanding leave records into daily events"
            );
            let tallies = monthly_tallies(expand_all(&records), &mut diagnostics);
            let summary = match config.window_mode {
                WindowMode::Calendar => {
                    SummaryTable::assemble(tallies, calendar_totals, config.month_labels)
                }
                WindowMode::Rolling => {
                    let totals = RollingWindows::new(
                        as_of,
                        config.short_window_days,
                        config.long_window_days,
                    )
                    .totals(expand_all(&records));
                    SummaryTable::assemble(
                        tallies,
                        |tally| totals.get(&tally.employee.id).copied().unwrap_or_default(),
                        config.month_labels,
                    )
                }
            };
            (summary, config.window_mode)
        }
        Ingested::Tallies(tallies) => {
            info!(row_count = tallies.len(), "read pre-aggregated monthly totals");
            if config.window_mode == WindowMode::Rolling {
                diagnostics.column_warning(
                    "monthly totals carry no leave dates; using calendar-month windows",
                );
            }
            let summary = SummaryTable::assemble(tallies, calendar_totals, config.month_labels);
            (summary, WindowMode::Calendar)
        }
    };

    Ok(SummaryReport {
        summary,
        diagnostics,
        shape,
        window_mode,
        as_of,
    })
}

/// Reads `input`, computes the summary and writes it to `output`. Nothing is
/// written when the run fails.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn summarize_file(
    input: &Path,
    output: &Path,
    config: &SummaryConfig,
) -> Result<SummaryReport> {
    let table = io::read_table(input, config.sheet.as_deref())?;
    info!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read input table"
    );

    let report = summarize(&table, config, resolve_as_of(config))?;
    excel_write::write_summary(output, &report.summary, &config.output_sheet, report.as_of)?;
    info!(
        summary_rows = report.summary.len(),
        skipped_rows = report.diagnostics.skipped_rows(),
        window_mode = %report.window_mode,
        as_of = %report.as_of,
        "summary workbook written"
    );
    Ok(report)
}
