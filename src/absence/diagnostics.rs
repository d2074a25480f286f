//! Non-fatal advisories collected while a summary is computed.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::absence::model::EmployeeId;

/// Why a row did not contribute absence days.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum SkipReason {
    /// The leave start date is blank or not a recognisable date.
    InvalidStartDate { value: String },
    /// The quota days value is not a non-negative number; treated as 0.
    InvalidQuotaDays { value: String },
    /// The quota days value exceeds the configured maximum; treated as 0.
    QuotaDaysTooLarge { value: u32, limit: u32 },
    /// A legacy month cell is not numeric; treated as 0.
    InvalidMonthValue { month: usize, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidStartDate { value } if value.is_empty() => {
                write!(f, "leave start date is blank")
            }
            SkipReason::InvalidStartDate { value } => {
                write!(f, "leave start date '{value}' is not a valid date")
            }
            SkipReason::InvalidQuotaDays { value } => {
                write!(f, "quota days '{value}' is not a non-negative number; counted as 0")
            }
            SkipReason::QuotaDaysTooLarge { value, limit } => {
                write!(f, "quota days {value} exceeds the limit of {limit}; counted as 0")
            }
            SkipReason::InvalidMonthValue { month, value } => {
                write!(f, "month {month} value '{value}' is not numeric; counted as 0")
            }
        }
    }
}

/// Descriptive attribute that disagreed between rows for one employee id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    Name,
    OrgUnit,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityField::Name => write!(f, "name"),
            IdentityField::OrgUnit => write!(f, "org unit"),
        }
    }
}

/// A single advisory surfaced next to the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// A row's date or numeric field failed to coerce.
    SkippedRow {
        row: usize,
        #[serde(flatten)]
        reason: SkipReason,
    },
    /// Something noteworthy happened while mapping headers to fields.
    ColumnResolution { message: String },
    /// The same employee id carried different descriptive values; the later
    /// value was kept.
    IdentityConflict {
        employee_id: EmployeeId,
        field: IdentityField,
        previous: String,
        current: String,
        row: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedRow { row, reason } => write!(f, "row {row}: {reason}"),
            Diagnostic::ColumnResolution { message } => write!(f, "columns: {message}"),
            Diagnostic::IdentityConflict {
                employee_id,
                field,
                previous,
                current,
                row,
            } => write!(
                f,
                "row {row}: employee {employee_id} {field} changed from '{previous}' to '{current}'"
            ),
        }
    }
}

/// Ordered collection of advisories for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn skipped_row(&mut self, row: usize, reason: SkipReason) {
        self.push(Diagnostic::SkippedRow { row, reason });
    }

    pub fn column_warning(&mut self, message: impl Into<String>) {
        self.push(Diagnostic::ColumnResolution {
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of distinct rows reported as skipped.
    pub fn skipped_rows(&self) -> usize {
        let mut rows: Vec<usize> = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                Diagnostic::SkippedRow { row, .. } => Some(*row),
                _ => None,
            })
            .collect();
        rows.sort_unstable();
        rows.dedup();
        rows.len()
    }

    pub fn identity_conflicts(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, Diagnostic::IdentityConflict { .. }))
    }

    /// Emits every entry as a tracing warning.
    pub fn log(&self) {
        for entry in &self.entries {
            warn!("{entry}");
        }
    }
}
