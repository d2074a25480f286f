//! Per-employee, per-calendar-month aggregation of daily absence events.

use std::collections::BTreeMap;

use crate::absence::diagnostics::{Diagnostic, Diagnostics, IdentityField};
use crate::absence::model::{AbsenceEvent, Employee, EmployeeId, MonthlyTally};

/// Groups events by employee id and calendar month into dense tallies ordered
/// by employee id.
///
/// Name and org unit follow the last event seen for an id; every change is
/// recorded as an identity conflict.
pub fn monthly_tallies<I>(events: I, diagnostics: &mut Diagnostics) -> Vec<MonthlyTally>
where
    I: IntoIterator<Item = AbsenceEvent>,
{
    let mut tallies: BTreeMap<EmployeeId, MonthlyTally> = BTreeMap::new();

    for event in events {
        let tally = tallies
            .entry(event.employee.id)
            .or_insert_with(|| MonthlyTally::empty(event.employee.clone()));
        reconcile_identity(&mut tally.employee, &event.employee, event.row, diagnostics);
        let month = &mut tally.months[event.month_index()];
        *month = month.saturating_add(event.weight);
    }

    tallies.into_values().collect()
}

fn reconcile_identity(
    known: &mut Employee,
    seen: &Employee,
    row: usize,
    diagnostics: &mut Diagnostics,
) {
    let updates = [
        (IdentityField::Name, &mut known.name, &seen.name),
        (IdentityField::OrgUnit, &mut known.org_unit, &seen.org_unit),
    ];
    for (field, current, incoming) in updates {
        if current.as_str() != incoming.as_str() {
            diagnostics.push(Diagnostic::IdentityConflict {
                employee_id: seen.id,
                field,
                previous: current.clone(),
                current: incoming.clone(),
                row,
            });
            *current = incoming.clone();
        }
    }
}
