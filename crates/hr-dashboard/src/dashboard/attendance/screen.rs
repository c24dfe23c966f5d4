use super::super::domain::{RecordId, RecordIdentity};
use super::super::filter::{DepartmentFilter, RowFilter};
use super::super::roster::Roster;
use super::domain::{AttendanceEntry, AttendanceRow, AttendanceStatus};
use super::export::{export_file_name, to_csv_string, ExportError};
use super::reconcile::{reconcile, resolve_target_date};
use super::report::{aggregate_by_date, stats_from_rows, AttendanceStats, DailyAttendanceBucket};
use crate::backend::BackendError;
use chrono::NaiveDate;
use serde::Serialize;

/// What the attendance screen is asked to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceQuery {
    /// Day for the table and KPI cards; defaults to the latest logged day.
    pub date: Option<NaiveDate>,
    /// First day of the history chart.
    pub from: Option<NaiveDate>,
    pub department: DepartmentFilter,
    pub query: Option<String>,
}

impl AttendanceQuery {
    fn row_filter(&self) -> RowFilter {
        RowFilter {
            department: self.department.clone(),
            query: self.query.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceView {
    pub target_date: NaiveDate,
    pub departments: Vec<String>,
    /// Filtered table rows.
    pub rows: Vec<AttendanceRow>,
    /// Cards for the whole roster, whatever the table filter is.
    pub stats: AttendanceStats,
    pub chart: Vec<DailyAttendanceBucket>,
}

#[derive(Debug, Clone)]
pub struct AttendanceExport {
    pub file_name: String,
    pub body: String,
}

/// A status flip applied locally and not yet confirmed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToggle {
    pub id: RecordId,
    pub previous: AttendanceStatus,
    pub next: AttendanceStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    #[error("{placeholder} has no attendance record yet; create one instead of toggling it")]
    NoBackingRecord { placeholder: String },
    #[error("attendance record {0} is not loaded")]
    RecordNotFound(RecordId),
    #[error("status change was not saved: {0}")]
    Backend(#[from] BackendError),
}

/// State behind the attendance screen: the last good fetch and everything derived from it.
#[derive(Debug, Clone, Default)]
pub struct AttendanceScreen {
    roster: Roster,
    entries: Vec<AttendanceEntry>,
}

impl AttendanceScreen {
    pub fn new(roster: Roster, entries: Vec<AttendanceEntry>) -> Self {
        Self { roster, entries }
    }

    pub fn replace(&mut self, roster: Roster, entries: Vec<AttendanceEntry>) {
        self.roster = roster;
        self.entries = entries;
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn entries(&self) -> &[AttendanceEntry] {
        &self.entries
    }

    pub fn target_date(&self, explicit: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
        resolve_target_date(explicit, &self.entries, today)
    }

    pub fn rows(&self, target: NaiveDate) -> Vec<AttendanceRow> {
        reconcile(&self.roster, &self.entries, target)
    }

    pub fn view(&self, query: &AttendanceQuery, today: NaiveDate) -> AttendanceView {
        let target_date = self.target_date(query.date, today);
        let all_rows = self.rows(target_date);
        let stats = stats_from_rows(&all_rows, target_date);
        let rows = query.row_filter().apply(&all_rows);

        AttendanceView {
            target_date,
            departments: self.roster.department_options(),
            rows,
            stats,
            chart: aggregate_by_date(&self.entries, query.from),
        }
    }

    /// CSV of the filtered table, synthetic rows included.
    pub fn export(
        &self,
        query: &AttendanceQuery,
        today: NaiveDate,
    ) -> Result<AttendanceExport, ExportError> {
        let target_date = self.target_date(query.date, today);
        let rows = query.row_filter().apply(&self.rows(target_date));
        Ok(AttendanceExport {
            file_name: export_file_name(target_date),
            body: to_csv_string(&rows)?,
        })
    }

    /// Flips a persisted row's status in local state.
    ///
    /// Only records that back a reconciled row on their own day can be toggled. Synthetic rows,
    /// superseded duplicates and logs for people off the roster are refused and leave the
    /// state untouched.
    pub fn begin_toggle(&mut self, identity: &RecordIdentity) -> Result<PendingToggle, ToggleError> {
        let id = match identity {
            RecordIdentity::Persisted { id } => *id,
            RecordIdentity::Synthetic { placeholder } => {
                return Err(ToggleError::NoBackingRecord {
                    placeholder: placeholder.clone(),
                })
            }
        };
        if !self.is_visible(id) {
            return Err(ToggleError::RecordNotFound(id));
        }

        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(ToggleError::RecordNotFound(id))?;

        let pending = PendingToggle {
            id,
            previous: entry.status,
            next: entry.status.toggled(),
        };
        entry.status = pending.next;
        Ok(pending)
    }

    fn is_visible(&self, id: RecordId) -> bool {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .and_then(AttendanceEntry::day)
            .is_some_and(|day| {
                self.rows(day)
                    .iter()
                    .any(|row| row.identity.record_id() == Some(id))
            })
    }

    /// Undoes a toggle the backend did not accept, unless the row changed again since.
    pub fn revert_toggle(&mut self, pending: &PendingToggle) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == pending.id && entry.status == pending.next)
        {
            entry.status = pending.previous;
        }
    }

    /// Stores a record the backend confirmed, replacing any local copy with the same id.
    pub fn upsert_entry(&mut self, entry: AttendanceEntry) {
        match self.entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}
