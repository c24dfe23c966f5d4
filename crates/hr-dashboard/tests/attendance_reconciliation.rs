//! Attendance reconciliation through the crate's public surface.
//!
//! Scenarios cover roster completeness, the default target day, KPI arithmetic and the chart,
//! without reaching into private modules.

mod common {
    use chrono::NaiveDate;

    use hr_dashboard::dashboard::attendance::{AttendanceEntry, AttendanceStatus};
    use hr_dashboard::dashboard::{EmployeeId, RecordId, Roster, RosterEntity};

    pub(super) fn day(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
    }

    pub(super) fn member(id: i64, full_name: &str, department: &str) -> RosterEntity {
        RosterEntity {
            id: EmployeeId(id),
            full_name: full_name.to_string(),
            department: department.to_string(),
        }
    }

    pub(super) fn roster() -> Roster {
        Roster::new(vec![
            member(1, "Ada Lovelace", "Engineering"),
            member(2, "Alan Turing", "Research"),
            member(3, "Grace Hopper", "Engineering"),
            member(4, "Edsger Dijkstra", "Research"),
        ])
    }

    pub(super) fn log(
        id: i64,
        employee: &str,
        date: &str,
        check_in: Option<&str>,
        status: AttendanceStatus,
    ) -> AttendanceEntry {
        AttendanceEntry {
            id: RecordId(id),
            employee: employee.to_string(),
            employee_id: None,
            department: None,
            date: date.to_string(),
            check_in: check_in.map(str::to_string),
            check_out: None,
            status,
            minutes_late: None,
        }
    }

    pub(super) fn logs() -> Vec<AttendanceEntry> {
        vec![
            log(1, "Ada Lovelace", "2024-01-01", Some("08:55"), AttendanceStatus::Present),
            log(2, "Ada Lovelace", "2024-01-03", Some("09:00"), AttendanceStatus::Present),
            log(3, "Alan Turing", "2024-01-03", Some("09:30"), AttendanceStatus::Late),
            log(4, "Grace Hopper", "2024-01-02", Some("09:05"), AttendanceStatus::Present),
            log(5, "Someone Else", "2024-01-03", Some("07:00"), AttendanceStatus::Present),
            log(6, "Edsger Dijkstra", "03/01/2024", None, AttendanceStatus::Present),
        ]
    }
}

use common::*;
use hr_dashboard::dashboard::attendance::{
    aggregate_by_date, reconcile, resolve_target_date, summary_stats, AttendanceStatus,
};
use hr_dashboard::dashboard::{EmployeeId, Roster, NO_DATA};
use std::collections::HashSet;

#[test]
fn every_roster_member_gets_exactly_one_row() {
    let roster = roster();
    for target in ["2024-01-01", "2024-01-02", "2024-01-03", "2030-12-31"] {
        let rows = reconcile(&roster, &logs(), day(target));
        assert_eq!(rows.len(), roster.len());
        let members: HashSet<EmployeeId> = rows.iter().map(|row| row.employee_id).collect();
        assert_eq!(members.len(), roster.len());
    }
}

#[test]
fn unmatched_members_default_to_absent_with_no_times() {
    let rows = reconcile(&roster(), &logs(), day("2024-01-03"));

    let grace = &rows[2];
    assert!(grace.identity.is_synthetic());
    assert_eq!(grace.key(), "temp-3");
    assert_eq!(grace.status, AttendanceStatus::Absent);
    assert_eq!(grace.minutes_late, 0);
    assert_eq!(grace.check_in, None);
    assert_eq!(grace.check_in_label(), NO_DATA);

    // a log with an unparseable date never matches
    assert!(rows[3].identity.is_synthetic());
}

#[test]
fn reconcile_is_pure() {
    let roster = roster();
    let logs = logs();
    let snapshot = logs.clone();
    let first = reconcile(&roster, &logs, day("2024-01-03"));
    let second = reconcile(&roster, &logs, day("2024-01-03"));
    assert_eq!(first, second);
    assert_eq!(logs, snapshot);
}

#[test]
fn default_target_is_the_latest_logged_day() {
    let logs = vec![
        log(1, "Ada Lovelace", "2024-01-01", None, AttendanceStatus::Present),
        log(2, "Ada Lovelace", "2024-01-03", None, AttendanceStatus::Present),
        log(3, "Ada Lovelace", "2024-01-02", None, AttendanceStatus::Present),
    ];
    assert_eq!(
        resolve_target_date(None, &logs, day("2030-06-30")),
        day("2024-01-03")
    );
    assert_eq!(
        resolve_target_date(Some(day("2024-01-01")), &logs, day("2030-06-30")),
        day("2024-01-01")
    );
    assert_eq!(
        resolve_target_date(None, &[], day("2030-06-30")),
        day("2030-06-30")
    );
}

#[test]
fn stats_never_double_count() {
    let roster = roster();
    let mut logs = logs();
    logs.push(log(7, "Ada Lovelace", "2024-01-03", Some("09:20"), AttendanceStatus::Late));

    for target in ["2024-01-01", "2024-01-02", "2024-01-03", "2024-02-01"] {
        let stats = summary_stats(&roster, &logs, day(target));
        assert_eq!(stats.total_employees, roster.len());
        assert_eq!(stats.present + stats.late + stats.absent, stats.total_employees);
    }
}

#[test]
fn average_check_in_and_sentinel() {
    let roster = Roster::new(vec![member(1, "A B", "IT"), member(2, "C D", "IT")]);
    let logs = vec![
        log(1, "A B", "2024-05-01", Some("09:00"), AttendanceStatus::Present),
        log(2, "C D", "2024-05-01", Some("09:30"), AttendanceStatus::Late),
    ];

    let stats = summary_stats(&roster, &logs, day("2024-05-01"));
    assert_eq!(stats.average_check_in_label(), "09:15");

    let empty = summary_stats(&roster, &logs, day("2024-05-02"));
    assert_eq!(empty.average_check_in, None);
    assert_eq!(empty.average_check_in_label(), NO_DATA);
}

#[test]
fn chart_days_are_sorted_and_filtered() {
    let buckets = aggregate_by_date(&logs(), None);
    let days: Vec<_> = buckets.iter().map(|bucket| bucket.date).collect();
    assert!(days.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(days, vec![day("2024-01-01"), day("2024-01-02"), day("2024-01-03")]);
    assert_eq!(buckets[2].present, 2);
    assert_eq!(buckets[2].late, 1);

    let recent = aggregate_by_date(&logs(), Some(day("2024-01-02")));
    assert_eq!(recent.len(), 2);
}

#[test]
fn single_member_without_logs_scenario() {
    let roster = Roster::new(vec![member(1, "A B", "IT")]);
    let rows = reconcile(&roster, &[], day("2024-05-01"));

    assert_eq!(rows.len(), 1);
    let row = serde_json::to_value(&rows[0]).expect("row serializes");
    assert_eq!(row["employee"], "A B");
    assert_eq!(row["department"], "IT");
    assert_eq!(row["date"], "2024-05-01");
    assert!(row["checkIn"].is_null());
    assert!(row["checkOut"].is_null());
    assert_eq!(row["status"], "Absent");
    assert_eq!(row["minutesLate"], 0);
}
