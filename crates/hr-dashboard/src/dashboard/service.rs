use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::attendance::{
    AttendanceEntry, AttendanceExport, AttendanceQuery, AttendanceScreen, AttendanceStatus,
    AttendanceView, ExportError, NewAttendanceEntry, ToggleError,
};
use super::directory::{DirectoryQuery, DirectoryScreen, DirectoryView};
use super::domain::{format_day, EmployeeId, RecordId, RecordIdentity};
use super::filter::RowFilter;
use super::leaves::{LeaveDecision, LeaveQueue, LeaveRequest, LeaveStatus, LeaveView};
use super::payroll::{PayrollScreen, PayrollStatus, PayrollUpdateError, PayrollView, Payslip};
use super::roster::Roster;
use crate::backend::{BackendError, HrBackend};

/// Attendance to record for a roster member who has no log on `date` yet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDraft {
    #[serde(alias = "employee_id")]
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub minutes_late: Option<u32>,
}

/// Record counts loaded by a full refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub employees: usize,
    pub attendance: usize,
    pub payrolls: usize,
    pub leaves: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("could not refresh {screen}; keeping the previous data: {source}")]
    Refresh {
        screen: &'static str,
        #[source]
        source: BackendError,
    },
    #[error("employee {0} is not on the roster")]
    UnknownEmployee(EmployeeId),
    #[error("{employee} already has an attendance record on {date}")]
    AlreadyRecorded { employee: String, date: NaiveDate },
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Owns one state object per screen and keeps them in step with the HR backend.
///
/// Screen locks are released before any backend call. Toggles and payroll status changes are
/// applied locally first and rolled back when the backend refuses them; leave decisions and
/// attendance creation only land once the backend has accepted them. Attendance creation is
/// serialized so the duplicate check and the create cannot interleave.
pub struct DashboardService<B> {
    backend: Arc<B>,
    recording: Mutex<()>,
    attendance: RwLock<AttendanceScreen>,
    payroll: RwLock<PayrollScreen>,
    directory: RwLock<DirectoryScreen>,
    leaves: RwLock<LeaveQueue>,
}

impl<B> DashboardService<B>
where
    B: HrBackend + 'static,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            recording: Mutex::new(()),
            attendance: RwLock::new(AttendanceScreen::default()),
            payroll: RwLock::new(PayrollScreen::default()),
            directory: RwLock::new(DirectoryScreen::default()),
            leaves: RwLock::new(LeaveQueue::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn refresh_attendance(&self) -> Result<usize, DashboardError> {
        let (employees, entries) = tokio::try_join!(
            self.backend.fetch_employees(),
            self.backend.fetch_attendance()
        )
        .map_err(|source| refresh_failed("attendance", source))?;

        let count = entries.len();
        self.attendance
            .write()
            .await
            .replace(Roster::from_employees(&employees), entries);
        info!(employees = employees.len(), entries = count, "attendance refreshed");
        Ok(count)
    }

    pub async fn refresh_payroll(&self) -> Result<usize, DashboardError> {
        let (employees, entries) = tokio::try_join!(
            self.backend.fetch_employees(),
            self.backend.fetch_payrolls()
        )
        .map_err(|source| refresh_failed("payroll", source))?;

        let count = entries.len();
        self.payroll
            .write()
            .await
            .replace(Roster::from_employees(&employees), entries);
        info!(employees = employees.len(), entries = count, "payroll refreshed");
        Ok(count)
    }

    pub async fn refresh_directory(&self) -> Result<usize, DashboardError> {
        let employees = self
            .backend
            .fetch_employees()
            .await
            .map_err(|source| refresh_failed("directory", source))?;
        let count = employees.len();
        self.directory.write().await.replace(employees);
        Ok(count)
    }

    pub async fn refresh_leaves(&self) -> Result<usize, DashboardError> {
        let requests = self
            .backend
            .fetch_leaves()
            .await
            .map_err(|source| refresh_failed("leaves", source))?;
        let count = requests.len();
        self.leaves.write().await.replace(requests);
        Ok(count)
    }

    /// Fetches every collection concurrently; nothing is replaced unless all of them arrive.
    pub async fn refresh_all(&self) -> Result<RefreshSummary, DashboardError> {
        let (employees, attendance, payrolls, leaves) = tokio::try_join!(
            self.backend.fetch_employees(),
            self.backend.fetch_attendance(),
            self.backend.fetch_payrolls(),
            self.backend.fetch_leaves()
        )
        .map_err(|source| refresh_failed("dashboard", source))?;

        let summary = RefreshSummary {
            employees: employees.len(),
            attendance: attendance.len(),
            payrolls: payrolls.len(),
            leaves: leaves.len(),
        };
        let roster = Roster::from_employees(&employees);

        self.attendance
            .write()
            .await
            .replace(roster.clone(), attendance);
        self.payroll.write().await.replace(roster, payrolls);
        self.directory.write().await.replace(employees);
        self.leaves.write().await.replace(leaves);

        info!(
            employees = summary.employees,
            attendance = summary.attendance,
            payrolls = summary.payrolls,
            leaves = summary.leaves,
            "dashboard refreshed"
        );
        Ok(summary)
    }

    pub async fn attendance_view(
        &self,
        query: &AttendanceQuery,
        today: NaiveDate,
    ) -> AttendanceView {
        self.attendance.read().await.view(query, today)
    }

    pub async fn attendance_export(
        &self,
        query: &AttendanceQuery,
        today: NaiveDate,
    ) -> Result<AttendanceExport, DashboardError> {
        Ok(self.attendance.read().await.export(query, today)?)
    }

    /// Quick toggle; returns the status now stored by the backend.
    pub async fn toggle_attendance(
        &self,
        identity: &RecordIdentity,
    ) -> Result<AttendanceStatus, ToggleError> {
        let pending = self.attendance.write().await.begin_toggle(identity)?;

        match self
            .backend
            .update_attendance_status(pending.id, pending.next)
            .await
        {
            Ok(()) => {
                info!(id = %pending.id, status = pending.next.label(), "attendance toggled");
                Ok(pending.next)
            }
            Err(err) => {
                warn!(id = %pending.id, error = %err, "attendance toggle rejected; reverting");
                self.attendance.write().await.revert_toggle(&pending);
                Err(ToggleError::Backend(err))
            }
        }
    }

    /// Creates the backing record for a roster member's synthetic row.
    pub async fn record_attendance(
        &self,
        draft: AttendanceDraft,
    ) -> Result<AttendanceEntry, DashboardError> {
        let _recording = self.recording.lock().await;
        let new_entry = {
            let screen = self.attendance.read().await;
            let member = screen
                .roster()
                .get(draft.employee_id)
                .ok_or(DashboardError::UnknownEmployee(draft.employee_id))?;
            let already_recorded = screen
                .rows(draft.date)
                .iter()
                .any(|row| row.employee_id == member.id && !row.identity.is_synthetic());
            if already_recorded {
                return Err(DashboardError::AlreadyRecorded {
                    employee: member.full_name.clone(),
                    date: draft.date,
                });
            }

            NewAttendanceEntry {
                employee: member.full_name.clone(),
                employee_id: member.id,
                department: member.department.clone(),
                date: format_day(draft.date),
                check_in: draft.check_in,
                check_out: draft.check_out,
                status: draft.status,
                minutes_late: draft.minutes_late.unwrap_or(0),
            }
        };

        let created = self
            .backend
            .create_attendance(new_entry)
            .await
            .inspect_err(|err| warn!(error = %err, "attendance record was not created"))?;
        info!(id = %created.id, employee = %created.employee, "attendance recorded");
        self.attendance.write().await.upsert_entry(created.clone());
        Ok(created)
    }

    pub async fn payroll_view(&self, filter: &RowFilter) -> PayrollView {
        self.payroll.read().await.view(filter)
    }

    pub async fn payslip(&self, identity: &RecordIdentity) -> Result<Payslip, DashboardError> {
        self.payroll
            .read()
            .await
            .payslip(identity)
            .ok_or_else(|| DashboardError::NotFound(format!("payroll row {}", identity.key())))
    }

    pub async fn set_payroll_status(
        &self,
        identity: &RecordIdentity,
        status: PayrollStatus,
    ) -> Result<PayrollStatus, PayrollUpdateError> {
        let pending = self
            .payroll
            .write()
            .await
            .begin_status_change(identity, status)?;

        if let Err(err) = self
            .backend
            .update_payroll_status(pending.id, pending.next)
            .await
        {
            warn!(id = %pending.id, error = %err, "payroll status rejected; reverting");
            self.payroll.write().await.revert_status_change(&pending);
            return Err(PayrollUpdateError::Backend(err));
        }
        info!(id = %pending.id, status = pending.next.label(), "payroll status updated");
        Ok(pending.next)
    }

    pub async fn directory_view(&self, query: &DirectoryQuery) -> DirectoryView {
        self.directory.read().await.view(query)
    }

    pub async fn leave_view(&self, status: LeaveStatus) -> LeaveView {
        self.leaves.read().await.view(status)
    }

    pub async fn decide_leave(
        &self,
        id: RecordId,
        decision: LeaveDecision,
    ) -> Result<LeaveRequest, DashboardError> {
        if self.leaves.read().await.get(id).is_none() {
            return Err(DashboardError::NotFound(format!("leave request {id}")));
        }

        self.backend
            .update_leave_status(id, decision.into())
            .await
            .inspect_err(|err| warn!(%id, error = %err, "leave decision was not saved"))?;

        let mut queue = self.leaves.write().await;
        queue.apply_decision(id, decision);
        queue
            .get(id)
            .cloned()
            .ok_or_else(|| DashboardError::NotFound(format!("leave request {id}")))
    }
}

fn refresh_failed(screen: &'static str, source: BackendError) -> DashboardError {
    warn!(screen, error = %source, "refresh failed; previous data kept");
    DashboardError::Refresh { screen, source }
}
