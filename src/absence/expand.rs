//! Leave interval expansion into daily absence events.
//!
//! Every calendar day of an interval counts as one absence day; weekends and
//! public holidays are not excluded.

use chrono::Days;

use crate::absence::model::{AbsenceEvent, LeaveRecord};

/// Expands a leave record into one event per consecutive calendar day,
/// starting with the start date itself. A quota of zero yields nothing.
pub fn expand(record: &LeaveRecord) -> impl Iterator<Item = AbsenceEvent> + '_ {
    (0..record.quota_days).map_while(move |offset| {
        record
            .start
            .checked_add_days(Days::new(u64::from(offset)))
            .map(|date| AbsenceEvent {
                row: record.row,
                employee: record.employee.clone(),
                date,
                weight: AbsenceEvent::DAY,
            })
    })
}

/// Lazily expands every record, preserving input order.
pub fn expand_all(records: &[LeaveRecord]) -> impl Iterator<Item = AbsenceEvent> + '_ {
    records.iter().flat_map(expand)
}
