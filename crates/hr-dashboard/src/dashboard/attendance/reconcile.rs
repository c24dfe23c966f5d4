use super::super::domain::{format_day, RecordIdentity};
use super::super::roster::{DuplicatePolicy, Roster, RosterEntity};
use super::domain::{AttendanceEntry, AttendanceRow, AttendanceStatus};
use chrono::NaiveDate;

/// Day the attendance table shows.
///
/// An explicit choice wins; otherwise the latest day any log exists for, and `today` when
/// there are no parseable logs at all.
pub fn resolve_target_date(
    explicit: Option<NaiveDate>,
    entries: &[AttendanceEntry],
    today: NaiveDate,
) -> NaiveDate {
    explicit
        .or_else(|| entries.iter().filter_map(AttendanceEntry::day).max())
        .unwrap_or(today)
}

/// One row per roster member for `target`, in roster order.
///
/// Members with a log for that day get it, with their current roster department. Everyone
/// else gets a synthetic `Absent` row.
pub fn reconcile(
    roster: &Roster,
    entries: &[AttendanceEntry],
    target: NaiveDate,
) -> Vec<AttendanceRow> {
    let date = format_day(target);
    let index = roster.index_records(
        entries.iter().filter(|entry| entry.day() == Some(target)),
        DuplicatePolicy::KeepLast,
    );

    roster
        .members()
        .iter()
        .enumerate()
        .map(|(position, member)| match index.get(&position) {
            Some(entry) => merged_row(member, entry, &date),
            None => synthetic_row(member, &date),
        })
        .collect()
}

fn merged_row(member: &RosterEntity, entry: &AttendanceEntry, date: &str) -> AttendanceRow {
    AttendanceRow {
        identity: RecordIdentity::Persisted { id: entry.id },
        employee_id: member.id,
        employee: entry.employee.clone(),
        department: member.department.clone(),
        date: date.to_string(),
        check_in: entry.check_in.clone(),
        check_out: entry.check_out.clone(),
        status: entry.status,
        minutes_late: entry.minutes_late.unwrap_or(0),
    }
}

fn synthetic_row(member: &RosterEntity, date: &str) -> AttendanceRow {
    AttendanceRow {
        identity: RecordIdentity::synthetic_for(member.id),
        employee_id: member.id,
        employee: member.full_name.clone(),
        department: member.department.clone(),
        date: date.to_string(),
        check_in: None,
        check_out: None,
        status: AttendanceStatus::Absent,
        minutes_late: 0,
    }
}
