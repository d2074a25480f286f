//! Core library for the absence-tools command line application.
//!
//! The library turns raw leave records into a per-employee absence summary:
//! a dense January–December matrix with a grand total and trailing 3- and
//! 6-month totals. Stages are kept narrow and composable: header mapping lives
//! in [`absence::resolve`], row coercion and allow-list filtering in
//! [`absence::ingest`] and [`absence::filter`], interval expansion in
//! [`absence::expand`], aggregation in [`absence::aggregate`] and
//! [`absence::window`], and the run orchestration in [`absence::report`].
//! Spreadsheet and CSV adapters sit under [`absence::io`].

pub mod absence;

pub use absence::{
    Result, SummaryError, aggregate, coerce, config, diagnostics, error, expand, filter, ingest,
    io, model, report, resolve, summary, window,
};
