//! Summary rows and their fixed column layout.

use crate::absence::config::MonthLabels;
use crate::absence::model::{EmployeeId, MonthlyTally};
use crate::absence::window::WindowTotals;

pub const STAFF_ID_HEADER: &str = "Staff ID";
pub const NAME_HEADER: &str = "Name";
pub const ORG_UNIT_HEADER: &str = "Org Unit";
pub const GRAND_TOTAL_HEADER: &str = "Grand Total";
pub const LAST_3_MONTHS_HEADER: &str = "Absence Days (Last 3 Months)";
pub const LAST_6_MONTHS_HEADER: &str = "Absence Days (Last 6 Months)";

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One employee's line in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub staff_id: EmployeeId,
    pub name: String,
    pub org_unit: String,
    /// Absence days per calendar month, January first.
    pub months: [u32; 12],
    pub grand_total: u64,
    pub last_3_months: u64,
    pub last_6_months: u64,
}

impl SummaryRow {
    /// Builds a row from a dense tally and its window totals. The grand total
    /// is always the sum of the twelve months.
    pub fn new(tally: MonthlyTally, windows: WindowTotals) -> Self {
        let grand_total = tally.grand_total();
        Self {
            staff_id: tally.employee.id,
            name: tally.employee.name,
            org_unit: tally.employee.org_unit,
            months: tally.months,
            grand_total,
            last_3_months: windows.last_3_months,
            last_6_months: windows.last_6_months,
        }
    }

    /// Absence days of a one-based calendar month.
    pub fn month(&self, month: usize) -> u32 {
        self.months[month - 1]
    }
}

/// The assembled summary, ordered by staff id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTable {
    pub month_labels: MonthLabels,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Assembles rows from tallies, computing each row's windows with
    /// `windows`. Rows are stably sorted by staff id, so duplicate ids keep
    /// their input order.
    pub fn assemble<F>(
        tallies: Vec<MonthlyTally>,
        windows: F,
        month_labels: MonthLabels,
    ) -> Self
    where
        F: Fn(&MonthlyTally) -> WindowTotals,
    {
        let mut rows: Vec<SummaryRow> = tallies
            .into_iter()
            .map(|tally| {
                let totals = windows(&tally);
                SummaryRow::new(tally, totals)
            })
            .collect();
        rows.sort_by_key(|row| row.staff_id);
        Self { month_labels, rows }
    }

    /// Header labels in output order.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(18);
        headers.extend(
            [STAFF_ID_HEADER, NAME_HEADER, ORG_UNIT_HEADER]
                .iter()
                .map(|label| label.to_string()),
        );
        headers.extend(month_headers(self.month_labels));
        headers.extend(
            [GRAND_TOTAL_HEADER, LAST_3_MONTHS_HEADER, LAST_6_MONTHS_HEADER]
                .iter()
                .map(|label| label.to_string()),
        );
        headers
    }

    /// Finds the first row for `staff_id`.
    pub fn row(&self, staff_id: EmployeeId) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.staff_id == staff_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Labels of the twelve month columns.
pub fn month_headers(labels: MonthLabels) -> Vec<String> {
    match labels {
        MonthLabels::Abbreviated => MONTH_ABBREVIATIONS
            .iter()
            .map(|label| label.to_string())
            .collect(),
        MonthLabels::Numeric => (1..=12).map(|month| month.to_string()).collect(),
    }
}
