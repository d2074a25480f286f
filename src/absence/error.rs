use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Error type covering the fatal failure cases of a summary run. Non-fatal
/// advisories are collected as [`Diagnostic`](crate::diagnostics::Diagnostic)
/// entries instead.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("writing summary workbook failed: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("reading input workbook failed: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Errors bubbled up from the CSV reader.
    #[error("reading input CSV failed: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when a workbook does not contain usable data.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when required canonical fields cannot be mapped onto input columns.
    #[error("column resolution failed: missing required column(s) {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Raised when the input file extension is not a supported tabular format.
    #[error("unsupported input format '{0}' (expected .xlsx, .xlsm or .csv)")]
    UnsupportedInput(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the configuration fails validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when a date supplied on the command line cannot be parsed.
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl SummaryError {
    /// Builds a schema error from canonical field names.
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SummaryError::Schema {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }
}
