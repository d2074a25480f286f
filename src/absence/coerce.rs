//! Cell coercion into the typed values a leave record needs.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::absence::model::{Cell, EmployeeId};

/// Day zero of the Excel 1900 date system, accounting for the phantom
/// 1900-02-29.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
/// Largest serial Excel can display (9999-12-31).
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%m/%d/%Y",
];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Coerces an employee id. Anything that is not an integer, a float or numeric
/// text collapses to `0`.
pub fn employee_id(cell: &Cell) -> EmployeeId {
    match cell {
        Cell::Number(value) if value.is_finite() => value.trunc() as EmployeeId,
        Cell::Text(text) => {
            let text = text.trim();
            text.parse::<EmployeeId>()
                .ok()
                .or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|value| value.is_finite())
                        .map(|value| value.trunc() as EmployeeId)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Coerces a day count. Blank cells are `Some(0)`; values that are not
/// non-negative numbers are `None`. Fractions truncate toward zero.
pub fn day_count(cell: &Cell) -> Option<u32> {
    let value = match cell {
        Cell::Empty => return Some(0),
        Cell::Number(value) => *value,
        Cell::Text(text) if text.trim().is_empty() => return Some(0),
        Cell::Text(text) => text.trim().parse::<f64>().ok()?,
        Cell::Bool(_) | Cell::Date(_) => return None,
    };
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.trunc().min(u32::MAX as f64) as u32)
}

/// Coerces a leave start date from a native date, an Excel serial or text.
pub fn start_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(date) => Some(*date),
        Cell::Number(serial) => excel_serial_to_date(*serial),
        Cell::Text(text) => parse_date_text(text),
        Cell::Empty | Cell::Bool(_) => None,
    }
}

/// Converts an Excel serial day number into a calendar date. The time of day
/// part is ignored.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=EXCEL_MAX_SERIAL).contains(&serial) {
        return None;
    }
    let (year, month, day) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(year, month, day)?.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Parses a date written as text. ISO and day-first layouts are tried before
/// the month-first `MM/DD/YYYY` layout.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
}
