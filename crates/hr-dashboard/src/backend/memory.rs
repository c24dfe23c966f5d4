use super::{BackendError, HrBackend};
use crate::dashboard::attendance::{AttendanceEntry, AttendanceStatus, NewAttendanceEntry};
use crate::dashboard::domain::RecordId;
use crate::dashboard::leaves::{LeaveRequest, LeaveStatus};
use crate::dashboard::payroll::{PayrollEntry, PayrollStatus};
use crate::dashboard::roster::EmployeeRecord;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Store {
    employees: Vec<EmployeeRecord>,
    attendance: Vec<AttendanceEntry>,
    payrolls: Vec<PayrollEntry>,
    leaves: Vec<LeaveRequest>,
    fail_reads: bool,
    fail_writes: bool,
}

impl Store {
    fn next_attendance_id(&self) -> RecordId {
        let max = self.attendance.iter().map(|entry| entry.id.0).max().unwrap_or(0);
        RecordId(max + 1)
    }
}

/// Backend held in process memory, for local runs and tests.
///
/// Reads and writes can be switched to fail to exercise the dashboard's recovery paths.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBackend {
    store: Arc<Mutex<Store>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(self, employees: Vec<EmployeeRecord>) -> Self {
        self.lock().employees = employees;
        self
    }

    pub fn with_attendance(self, attendance: Vec<AttendanceEntry>) -> Self {
        self.lock().attendance = attendance;
        self
    }

    pub fn with_payrolls(self, payrolls: Vec<PayrollEntry>) -> Self {
        self.lock().payrolls = payrolls;
        self
    }

    pub fn with_leaves(self, leaves: Vec<LeaveRequest>) -> Self {
        self.lock().leaves = leaves;
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn attendance(&self) -> Vec<AttendanceEntry> {
        self.lock().attendance.clone()
    }

    pub fn payrolls(&self) -> Vec<PayrollEntry> {
        self.lock().payrolls.clone()
    }

    pub fn leaves(&self) -> Vec<LeaveRequest> {
        self.lock().leaves.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<T: Clone>(
        &self,
        pick: impl FnOnce(&Store) -> &Vec<T>,
    ) -> Result<Vec<T>, BackendError> {
        let store = self.lock();
        if store.fail_reads {
            return Err(BackendError::Unavailable("reads disabled".to_string()));
        }
        Ok(pick(&store).clone())
    }

    fn write<T>(
        &self,
        apply: impl FnOnce(&mut Store) -> Option<T>,
        path: String,
    ) -> Result<T, BackendError> {
        let mut store = self.lock();
        if store.fail_writes {
            return Err(BackendError::Unavailable("writes disabled".to_string()));
        }
        apply(&mut store).ok_or(BackendError::Status {
            path,
            status: 404,
            body: "not found".to_string(),
        })
    }
}

#[async_trait]
impl HrBackend for InMemoryBackend {
    async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, BackendError> {
        self.read(|store| &store.employees)
    }

    async fn fetch_attendance(&self) -> Result<Vec<AttendanceEntry>, BackendError> {
        self.read(|store| &store.attendance)
    }

    async fn fetch_payrolls(&self) -> Result<Vec<PayrollEntry>, BackendError> {
        self.read(|store| &store.payrolls)
    }

    async fn fetch_leaves(&self) -> Result<Vec<LeaveRequest>, BackendError> {
        self.read(|store| &store.leaves)
    }

    async fn update_attendance_status(
        &self,
        id: RecordId,
        status: AttendanceStatus,
    ) -> Result<(), BackendError> {
        self.write(
            |store| {
                let entry = store.attendance.iter_mut().find(|entry| entry.id == id)?;
                entry.status = status;
                Some(())
            },
            format!("attendance/{id}"),
        )
    }

    async fn create_attendance(
        &self,
        entry: NewAttendanceEntry,
    ) -> Result<AttendanceEntry, BackendError> {
        self.write(
            |store| {
                let created = AttendanceEntry {
                    id: store.next_attendance_id(),
                    employee: entry.employee,
                    employee_id: Some(entry.employee_id),
                    department: Some(entry.department),
                    date: entry.date,
                    check_in: entry.check_in,
                    check_out: entry.check_out,
                    status: entry.status,
                    minutes_late: Some(entry.minutes_late),
                };
                store.attendance.push(created.clone());
                Some(created)
            },
            "attendance".to_string(),
        )
    }

    async fn update_payroll_status(
        &self,
        id: RecordId,
        status: PayrollStatus,
    ) -> Result<(), BackendError> {
        self.write(
            |store| {
                let entry = store.payrolls.iter_mut().find(|entry| entry.id == id)?;
                entry.status = status;
                Some(())
            },
            format!("payrolls/{id}"),
        )
    }

    async fn update_leave_status(
        &self,
        id: RecordId,
        status: LeaveStatus,
    ) -> Result<(), BackendError> {
        self.write(
            |store| {
                let request = store.leaves.iter_mut().find(|request| request.id == id)?;
                request.status = status;
                Some(())
            },
            format!("leaves/{id}"),
        )
    }
}
