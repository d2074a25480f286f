//! Maps raw header labels onto canonical fields.
//!
//! Two input shapes are recognised. The leave-record shape carries one row per
//! leave grant and needs all six canonical fields. The legacy monthly shape
//! carries one row per employee with twelve pre-aggregated month columns
//! labelled `1`..`12`, `Jan`..`Dec` or by full month name.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::absence::config::{Field, FieldAliases, normalize_label};
use crate::absence::diagnostics::Diagnostics;
use crate::absence::error::{Result, SummaryError};

const MONTH_NAMES: [[&str; 2]; 12] = [
    ["jan", "january"],
    ["feb", "february"],
    ["mar", "march"],
    ["apr", "april"],
    ["may", "may"],
    ["jun", "june"],
    ["jul", "july"],
    ["aug", "august"],
    ["sep", "september"],
    ["oct", "october"],
    ["nov", "november"],
    ["dec", "december"],
];

/// Which of the supported input layouts a table follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputShape {
    /// One row per leave grant, expanded into daily events.
    LeaveRecords,
    /// One row per employee with twelve pre-aggregated month columns.
    MonthlyTotals,
}

/// Column indices of a leave-record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveColumns {
    pub employee_id: usize,
    pub employee_name: usize,
    pub org_unit: usize,
    pub leave_start_date: usize,
    pub quota_days: usize,
    pub absence_type: usize,
}

/// Column indices of a legacy monthly table. Months are January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyColumns {
    pub employee_id: usize,
    pub employee_name: Option<usize>,
    pub org_unit: Option<usize>,
    pub months: [usize; 12],
}

/// Outcome of column resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedColumns {
    LeaveRecords(LeaveColumns),
    MonthlyTotals(MonthlyColumns),
}

impl ResolvedColumns {
    pub fn shape(&self) -> InputShape {
        match self {
            ResolvedColumns::LeaveRecords(_) => InputShape::LeaveRecords,
            ResolvedColumns::MonthlyTotals(_) => InputShape::MonthlyTotals,
        }
    }
}

/// Resolves `headers` against the alias table.
///
/// The leave-record shape wins when every canonical field is present. The
/// monthly shape is the fallback when month columns are detected. Otherwise a
/// [`SummaryError::Schema`] names every missing field.
pub fn resolve_columns(
    headers: &[String],
    aliases: &FieldAliases,
    diagnostics: &mut Diagnostics,
) -> Result<ResolvedColumns> {
    let mut fields: BTreeMap<Field, usize> = BTreeMap::new();
    let mut months: [Option<usize>; 12] = [None; 12];

    for (index, header) in headers.iter().enumerate() {
        if let Some(field) = aliases.field_for(header) {
            match fields.get(&field) {
                Some(first) => diagnostics.column_warning(format!(
                    "columns '{}' and '{header}' both map to {field}; using '{}'",
                    headers[*first], headers[*first]
                )),
                None => {
                    fields.insert(field, index);
                }
            }
        } else if let Some(month) = month_number(header) {
            match months[month - 1] {
                Some(first) => diagnostics.column_warning(format!(
                    "columns '{}' and '{header}' both map to month {month}; using '{}'",
                    headers[first], headers[first]
                )),
                None => months[month - 1] = Some(index),
            }
        } else if !header.trim().is_empty() {
            debug!(column = %header, "ignoring unmapped column");
        }
    }

    let missing: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|field| !fields.contains_key(field))
        .collect();

    if missing.is_empty() {
        return Ok(ResolvedColumns::LeaveRecords(LeaveColumns {
            employee_id: fields[&Field::EmployeeId],
            employee_name: fields[&Field::EmployeeName],
            org_unit: fields[&Field::OrgUnit],
            leave_start_date: fields[&Field::LeaveStartDate],
            quota_days: fields[&Field::QuotaDays],
            absence_type: fields[&Field::AbsenceType],
        }));
    }

    if months.iter().all(Option::is_none) {
        return Err(SummaryError::schema(missing.iter().map(|field| field.as_str())));
    }

    resolve_monthly(&fields, &months, diagnostics)
}

fn resolve_monthly(
    fields: &BTreeMap<Field, usize>,
    months: &[Option<usize>; 12],
    diagnostics: &mut Diagnostics,
) -> Result<ResolvedColumns> {
    let mut missing: Vec<String> = Vec::new();
    if !fields.contains_key(&Field::EmployeeId) {
        missing.push(Field::EmployeeId.to_string());
    }
    for (index, column) in months.iter().enumerate() {
        if column.is_none() {
            missing.push(format!("month {}", index + 1));
        }
    }
    if !missing.is_empty() {
        return Err(SummaryError::Schema { missing });
    }

    for field in [Field::EmployeeName, Field::OrgUnit] {
        if !fields.contains_key(&field) {
            diagnostics.column_warning(format!(
                "monthly totals input has no {field} column; leaving it blank"
            ));
        }
    }

    let mut month_columns = [0usize; 12];
    for (slot, column) in month_columns.iter_mut().zip(months.iter().flatten()) {
        *slot = *column;
    }

    Ok(ResolvedColumns::MonthlyTotals(MonthlyColumns {
        employee_id: fields[&Field::EmployeeId],
        employee_name: fields.get(&Field::EmployeeName).copied(),
        org_unit: fields.get(&Field::OrgUnit).copied(),
        months: month_columns,
    }))
}

/// Recognises a month column label and returns its calendar month (1-12).
pub fn month_number(label: &str) -> Option<usize> {
    let label = normalize_label(label);
    if let Ok(value) = label.parse::<f64>() {
        let valid = value.fract() == 0.0 && (1.0..=12.0).contains(&value);
        return valid.then_some(value as usize);
    }
    if label == "sept" {
        return Some(9);
    }
    MONTH_NAMES
        .iter()
        .position(|names| names.contains(&label.as_str()))
        .map(|index| index + 1)
}
