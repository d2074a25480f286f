//! Absence-type allow-list filtering.

use std::collections::BTreeSet;

use crate::absence::model::{Cell, RawTable};

/// Set of absence types that count towards the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceFilter {
    allowed: BTreeSet<String>,
}

impl AbsenceFilter {
    /// Builds a filter from configured type labels. Surrounding whitespace is
    /// ignored; matching is otherwise exact and case-sensitive.
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = types
            .into_iter()
            .map(|kind| kind.as_ref().trim().to_string())
            .filter(|kind| !kind.is_empty())
            .collect();
        Self { allowed }
    }

    /// Returns `true` when `absence_type` is on the allow-list.
    pub fn allows(&self, absence_type: &str) -> bool {
        self.allowed.contains(absence_type.trim())
    }

    /// Returns `true` when the absence type cell of `row` is on the allow-list.
    pub fn retains(&self, row: &[Cell], absence_type_column: usize) -> bool {
        self.allows(&RawTable::cell(row, absence_type_column).to_text())
    }
}
