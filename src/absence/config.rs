//! Run configuration: the declarative header alias table, the absence-type
//! allow-list and the window settings.
//!
//! Configurations are plain serde structures so they can be kept next to the
//! input files as JSON. Every field has a default, so a partial JSON document
//! only needs to name what it changes. [`SummaryConfig::validate`] runs once
//! before any rows are processed.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::absence::error::{Result, SummaryError};

/// Allow-listed absence types counted by default.
pub const DEFAULT_ABSENCE_TYPES: [&str; 4] = [
    "Absent",
    "Absent Without Leave",
    "Sick Leave",
    "Unpaid Medical leave",
];

/// Default name of the exported workbook.
pub const DEFAULT_OUTPUT_FILE: &str = "Absence_Summary.xlsx";

/// Default worksheet name of the exported workbook.
pub const DEFAULT_OUTPUT_SHEET: &str = "Absence Summary";

/// Default upper bound on the quota of a single leave record: two years.
pub const DEFAULT_MAX_QUOTA_DAYS: u32 = 731;

const SHEET_NAME_MAX_LEN: usize = 31;
const SHEET_NAME_INVALID: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Canonical fields of a leave record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    EmployeeId,
    EmployeeName,
    OrgUnit,
    LeaveStartDate,
    QuotaDays,
    AbsenceType,
}

impl Field {
    /// All fields, in output and error-reporting order.
    pub const ALL: [Field; 6] = [
        Field::EmployeeId,
        Field::EmployeeName,
        Field::OrgUnit,
        Field::LeaveStartDate,
        Field::QuotaDays,
        Field::AbsenceType,
    ];

    /// Canonical snake_case name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::EmployeeId => "employee_id",
            Field::EmployeeName => "employee_name",
            Field::OrgUnit => "org_unit",
            Field::LeaveStartDate => "leave_start_date",
            Field::QuotaDays => "quota_days",
            Field::AbsenceType => "absence_type",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the two trailing-window totals are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowMode {
    /// Fixed calendar months: July–December and October–December.
    Calendar,
    /// Events dated within the last N days of the as-of date.
    #[default]
    Rolling,
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowMode::Calendar => write!(f, "calendar"),
            WindowMode::Rolling => write!(f, "rolling"),
        }
    }
}

/// Header style of the twelve month columns in the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthLabels {
    /// `Jan` .. `Dec`.
    #[default]
    Abbreviated,
    /// `1` .. `12`.
    Numeric,
}

/// Accepted header labels per canonical field. Matching ignores case and
/// collapses runs of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub employee_id: Vec<String>,
    pub employee_name: Vec<String>,
    pub org_unit: Vec<String>,
    pub leave_start_date: Vec<String>,
    pub quota_days: Vec<String>,
    pub absence_type: Vec<String>,
}

impl FieldAliases {
    /// Aliases configured for `field`.
    pub fn for_field(&self, field: Field) -> &[String] {
        match field {
            Field::EmployeeId => &self.employee_id,
            Field::EmployeeName => &self.employee_name,
            Field::OrgUnit => &self.org_unit,
            Field::LeaveStartDate => &self.leave_start_date,
            Field::QuotaDays => &self.quota_days,
            Field::AbsenceType => &self.absence_type,
        }
    }

    /// Returns the field whose alias list contains `label`, if any.
    pub fn field_for(&self, label: &str) -> Option<Field> {
        let label = normalize_label(label);
        Field::ALL.into_iter().find(|field| {
            self.for_field(*field)
                .iter()
                .any(|alias| normalize_label(alias) == label)
        })
    }
}

impl Default for FieldAliases {
    fn default() -> Self {
        fn labels(values: &[&str]) -> Vec<String> {
            values.iter().map(|value| value.to_string()).collect()
        }

        Self {
            employee_id: labels(&[
                "Personnel No.",
                "Personnel No",
                "Personnel Number",
                "Pers.No.",
                "Staff ID",
                "Employee ID",
                "Employee No.",
                "Employee Number",
                "Emp ID",
            ]),
            employee_name: labels(&[
                "Name",
                "Employee Name",
                "Staff Name",
                "Full Name",
                "Employee/app.name",
            ]),
            org_unit: labels(&[
                "Org Unit",
                "Org. Unit",
                "Organizational Unit",
                "Organisational Unit",
                "Department",
            ]),
            leave_start_date: labels(&[
                "Leave From",
                "Start Date",
                "Leave Start",
                "Leave Start Date",
                "Absence Start",
                "From",
            ]),
            quota_days: labels(&[
                "Quota Days",
                "Quota",
                "Days",
                "Absence Days",
                "Number of Days",
            ]),
            absence_type: labels(&[
                "Absence Type",
                "Leave Type",
                "Att./Absence Type",
                "Attendance or Absence Type",
                "Type",
            ]),
        }
    }
}

/// Complete configuration of a summary run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Header alias table used by the column resolver.
    pub aliases: FieldAliases,
    /// Absence types counted towards the summary (exact, case-sensitive).
    pub absence_types: Vec<String>,
    pub window_mode: WindowMode,
    /// Length of the "last 3 months" rolling window, in days.
    pub short_window_days: u32,
    /// Length of the "last 6 months" rolling window, in days.
    pub long_window_days: u32,
    /// Largest quota a single leave record may carry. Larger quotas are
    /// reported and counted as 0.
    pub max_quota_days: u32,
    pub month_labels: MonthLabels,
    /// Reference date for rolling windows. `None` means the local current date.
    pub as_of: Option<NaiveDate>,
    /// Worksheet to read from a workbook input. `None` reads the first sheet.
    pub sheet: Option<String>,
    /// Worksheet name of the exported summary.
    pub output_sheet: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            aliases: FieldAliases::default(),
            absence_types: DEFAULT_ABSENCE_TYPES
                .iter()
                .map(|value| value.to_string())
                .collect(),
            window_mode: WindowMode::default(),
            short_window_days: 90,
            long_window_days: 180,
            max_quota_days: DEFAULT_MAX_QUOTA_DAYS,
            month_labels: MonthLabels::default(),
            as_of: None,
            sheet: None,
            output_sheet: DEFAULT_OUTPUT_SHEET.to_string(),
        }
    }
}

impl SummaryConfig {
    /// Loads and validates a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: SummaryConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for contradictions before any row is read.
    pub fn validate(&self) -> Result<()> {
        let mut claimed: HashMap<String, Field> = HashMap::new();
        for field in Field::ALL {
            let aliases = self.aliases.for_field(field);
            if aliases.iter().all(|alias| normalize_label(alias).is_empty()) {
                return Err(SummaryError::InvalidConfig(format!(
                    "no header aliases configured for {field}"
                )));
            }
            for alias in aliases {
                let key = normalize_label(alias);
                if key.is_empty() {
                    continue;
                }
                if let Some(owner) = claimed.get(&key).copied() {
                    if owner != field {
                        return Err(SummaryError::InvalidConfig(format!(
                            "header alias '{alias}' is claimed by both {owner} and {field}"
                        )));
                    }
                }
                claimed.insert(key, field);
            }
        }

        if self.absence_types.iter().all(|kind| kind.trim().is_empty()) {
            return Err(SummaryError::InvalidConfig(
                "absence type allow-list is empty".into(),
            ));
        }

        if self.short_window_days == 0 || self.long_window_days == 0 {
            return Err(SummaryError::InvalidConfig(
                "rolling window lengths must be positive".into(),
            ));
        }
        if self.short_window_days > self.long_window_days {
            return Err(SummaryError::InvalidConfig(format!(
                "short window ({} days) is longer than long window ({} days)",
                self.short_window_days, self.long_window_days
            )));
        }

        if self.max_quota_days == 0 {
            return Err(SummaryError::InvalidConfig(
                "maximum quota days must be positive".into(),
            ));
        }

        validate_sheet_name(&self.output_sheet)
    }
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SummaryError::InvalidConfig(
            "output sheet name is empty".into(),
        ));
    }
    if name.chars().count() > SHEET_NAME_MAX_LEN {
        return Err(SummaryError::InvalidConfig(format!(
            "output sheet name '{name}' exceeds {SHEET_NAME_MAX_LEN} characters"
        )));
    }
    if let Some(ch) = name.chars().find(|ch| SHEET_NAME_INVALID.contains(ch)) {
        return Err(SummaryError::InvalidConfig(format!(
            "output sheet name '{name}' contains invalid character '{ch}'"
        )));
    }
    Ok(())
}

/// Normalises a header label for alias matching: trimmed, lower-cased and with
/// internal whitespace collapsed to single spaces.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
