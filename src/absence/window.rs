//! Trailing-window totals.
//!
//! Calendar mode sums fixed months of the reporting year (July–December and
//! October–December). Rolling mode sums events dated on or after the as-of
//! date minus the window length, which makes its result depend on the as-of
//! date.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::absence::model::{AbsenceEvent, EmployeeId, MonthlyTally};

/// Last-3 and last-6 month totals for one summary row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowTotals {
    pub last_3_months: u64,
    pub last_6_months: u64,
}

/// Calendar-month windows: months 10–12 and 7–12.
pub fn calendar_totals(tally: &MonthlyTally) -> WindowTotals {
    WindowTotals {
        last_3_months: tally.sum_months(10..=12),
        last_6_months: tally.sum_months(7..=12),
    }
}

/// Rolling windows anchored at an as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingWindows {
    pub as_of: NaiveDate,
    pub short_days: u32,
    pub long_days: u32,
}

impl RollingWindows {
    pub fn new(as_of: NaiveDate, short_days: u32, long_days: u32) -> Self {
        Self {
            as_of,
            short_days,
            long_days,
        }
    }

    /// Earliest date counted by the "last 3 months" window.
    pub fn short_cutoff(&self) -> NaiveDate {
        cutoff(self.as_of, self.short_days)
    }

    /// Earliest date counted by the "last 6 months" window.
    pub fn long_cutoff(&self) -> NaiveDate {
        cutoff(self.as_of, self.long_days)
    }

    /// Sums event weights per employee for both windows.
    pub fn totals<I>(&self, events: I) -> BTreeMap<EmployeeId, WindowTotals>
    where
        I: IntoIterator<Item = AbsenceEvent>,
    {
        let short_cutoff = self.short_cutoff();
        let long_cutoff = self.long_cutoff();
        let mut totals: BTreeMap<EmployeeId, WindowTotals> = BTreeMap::new();

        for event in events {
            let entry = totals.entry(event.employee.id).or_default();
            if event.date >= short_cutoff {
                entry.last_3_months += u64::from(event.weight);
            }
            if event.date >= long_cutoff {
                entry.last_6_months += u64::from(event.weight);
            }
        }

        totals
    }
}

fn cutoff(as_of: NaiveDate, days: u32) -> NaiveDate {
    as_of
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}
