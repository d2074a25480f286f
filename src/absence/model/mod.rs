use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier assigned to an employee ("Personnel No."). Values that cannot be
/// coerced into an integer collapse to `0`.
pub type EmployeeId = i64;

/// A single normalised input cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell.
    Empty,
    /// Text literal, kept verbatim.
    Text(String),
    /// Numeric literal.
    Number(f64),
    /// Boolean literal.
    Bool(bool),
    /// Calendar date, either native to the source or decoded from an Excel
    /// serial.
    Date(NaiveDate),
}

impl Cell {
    /// Renders the cell as display text. Dates use ISO formatting.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(value) => value.clone(),
            Cell::Number(value) => value.to_string(),
            Cell::Bool(value) => value.to_string(),
            Cell::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }

    /// Returns `true` for blank cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Header labels plus data rows read from one sheet or CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Creates a table from header labels and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Returns the cell at `column` of `row`, treating short rows as blank.
    pub fn cell<'a>(row: &'a [Cell], column: usize) -> &'a Cell {
        row.get(column).unwrap_or(&EMPTY_CELL)
    }

    /// Spreadsheet row number for a zero-based data row index (the header is
    /// row 1).
    pub fn row_number(index: usize) -> usize {
        index + 2
    }
}

/// Descriptive identity of an employee as carried on leave records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub org_unit: String,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>, org_unit: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            org_unit: org_unit.into(),
        }
    }
}

/// A leave grant that passed the absence filter and has a usable start date.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveRecord {
    /// Spreadsheet row number the record was read from.
    pub row: usize,
    pub employee: Employee,
    pub start: NaiveDate,
    /// Number of consecutive calendar days covered, starting at `start`.
    pub quota_days: u32,
}

/// One day of absence derived from a leave record.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsenceEvent {
    /// Spreadsheet row number of the originating leave record.
    pub row: usize,
    pub employee: Employee,
    pub date: NaiveDate,
    pub weight: u32,
}

impl AbsenceEvent {
    /// Weight carried by every expanded day.
    pub const DAY: u32 = 1;

    /// Calendar month of the event as a zero-based index (January = 0).
    pub fn month_index(&self) -> usize {
        self.date.month0() as usize
    }
}

/// Dense per-employee absence counts for January through December.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTally {
    pub employee: Employee,
    pub months: [u32; 12],
}

impl MonthlyTally {
    /// Creates an all-zero tally for the employee.
    pub fn empty(employee: Employee) -> Self {
        Self {
            employee,
            months: [0; 12],
        }
    }

    /// Sum of all twelve months. Twelve `u32` counts always fit in a `u64`.
    pub fn grand_total(&self) -> u64 {
        self.months.iter().copied().map(u64::from).sum()
    }

    /// Sum of the given one-based calendar months.
    pub fn sum_months(&self, months: std::ops::RangeInclusive<usize>) -> u64 {
        months.map(|month| u64::from(self.months[month - 1])).sum()
    }
}
