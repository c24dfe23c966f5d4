use super::super::domain::RecordIdentity;
use super::super::roster::{DuplicatePolicy, Roster, RosterEntity};
use super::domain::{PayrollEntry, PayrollRow, PayrollStatus};
use rust_decimal::Decimal;

/// One payroll row per roster member, in roster order.
///
/// The first payroll line matching a member is used and takes the member's current roster
/// department. Members without one get a synthetic `Unset` row with zero amounts.
pub fn reconcile(roster: &Roster, entries: &[PayrollEntry]) -> Vec<PayrollRow> {
    let index = roster.index_records(entries.iter(), DuplicatePolicy::KeepFirst);

    roster
        .members()
        .iter()
        .enumerate()
        .map(|(position, member)| match index.get(&position) {
            Some(entry) => PayrollRow {
                identity: RecordIdentity::Persisted { id: entry.id },
                employee_id: member.id,
                employee: entry.employee.clone(),
                department: member.department.clone(),
                base: entry.base,
                overtime: entry.overtime,
                deductions: entry.deductions,
                net: entry.net,
                status: entry.status,
            },
            None => synthetic_row(member),
        })
        .collect()
}

fn synthetic_row(member: &RosterEntity) -> PayrollRow {
    PayrollRow {
        identity: RecordIdentity::synthetic_for(member.id),
        employee_id: member.id,
        employee: member.full_name.clone(),
        department: member.department.clone(),
        base: Decimal::ZERO,
        overtime: Decimal::ZERO,
        deductions: Decimal::ZERO,
        net: Decimal::ZERO,
        status: PayrollStatus::Unset,
    }
}
