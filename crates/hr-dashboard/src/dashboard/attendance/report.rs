use super::super::domain::{average_time, ClockTime, NO_DATA};
use super::super::roster::Roster;
use super::domain::{AttendanceEntry, AttendanceRow, AttendanceStatus};
use super::reconcile::reconcile;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// KPI cards for one day. `present + late + absent` always equals `total_employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_employees: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    #[serde(serialize_with = "serialize_average")]
    pub average_check_in: Option<ClockTime>,
    pub target_date: NaiveDate,
}

impl AttendanceStats {
    /// `HH:MM`, or `-` when nobody checked in.
    pub fn average_check_in_label(&self) -> String {
        self.average_check_in
            .map(|time| time.to_string())
            .unwrap_or_else(|| NO_DATA.to_string())
    }
}

fn serialize_average<S>(value: &Option<ClockTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(time) => serializer.collect_str(time),
        None => serializer.serialize_str(NO_DATA),
    }
}

/// Per-day status counts for the history chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAttendanceBucket {
    pub date: NaiveDate,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
}

/// Summarizes `target` for the whole roster, independent of any table filter.
pub fn summary_stats(
    roster: &Roster,
    entries: &[AttendanceEntry],
    target: NaiveDate,
) -> AttendanceStats {
    stats_from_rows(&reconcile(roster, entries, target), target)
}

/// Classifies already reconciled rows; each row lands in exactly one bucket.
pub fn stats_from_rows(rows: &[AttendanceRow], target: NaiveDate) -> AttendanceStats {
    let mut stats = AttendanceStats {
        total_employees: rows.len(),
        present: 0,
        late: 0,
        absent: 0,
        average_check_in: None,
        target_date: target,
    };

    for row in rows {
        match row.status {
            AttendanceStatus::Present => stats.present += 1,
            AttendanceStatus::Late => stats.late += 1,
            AttendanceStatus::Absent | AttendanceStatus::Unrecognized => stats.absent += 1,
        }
    }

    stats.average_check_in = average_time(
        rows.iter()
            .filter_map(|row| row.check_in.as_deref())
            .filter_map(ClockTime::parse),
    );
    stats
}

/// Counts logs per day and status, oldest day first.
///
/// Logs before `from` and logs with an unparseable date are left out. Statuses other than
/// present, late and absent are not charted.
pub fn aggregate_by_date(
    entries: &[AttendanceEntry],
    from: Option<NaiveDate>,
) -> Vec<DailyAttendanceBucket> {
    let mut buckets: BTreeMap<NaiveDate, DailyAttendanceBucket> = BTreeMap::new();

    for entry in entries {
        let Some(date) = entry.day() else {
            debug!(record = %entry.id, date = %entry.date, "skipping log with malformed date");
            continue;
        };
        if from.is_some_and(|from| date < from) {
            continue;
        }

        let bucket = buckets.entry(date).or_insert_with(|| DailyAttendanceBucket {
            date,
            present: 0,
            late: 0,
            absent: 0,
        });
        match entry.status {
            AttendanceStatus::Present => bucket.present += 1,
            AttendanceStatus::Late => bucket.late += 1,
            AttendanceStatus::Absent => bucket.absent += 1,
            AttendanceStatus::Unrecognized => {}
        }
    }

    buckets.into_values().collect()
}
