//! Access to the HR REST backend that owns employees, attendance, payroll and leave data.

mod http;
mod memory;

pub use http::HttpBackend;
pub use memory::InMemoryBackend;

use crate::dashboard::attendance::{AttendanceEntry, AttendanceStatus, NewAttendanceEntry};
use crate::dashboard::domain::RecordId;
use crate::dashboard::leaves::{LeaveRequest, LeaveStatus};
use crate::dashboard::payroll::{PayrollEntry, PayrollStatus};
use crate::dashboard::roster::EmployeeRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend answered {status} for {path}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },
    #[error("could not decode backend payload for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid backend url '{0}'")]
    InvalidUrl(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    /// True when the backend itself said the addressed record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Collections and writes the dashboard needs from the HR backend.
#[async_trait]
pub trait HrBackend: Send + Sync {
    async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, BackendError>;

    async fn fetch_attendance(&self) -> Result<Vec<AttendanceEntry>, BackendError>;

    async fn fetch_payrolls(&self) -> Result<Vec<PayrollEntry>, BackendError>;

    async fn fetch_leaves(&self) -> Result<Vec<LeaveRequest>, BackendError>;

    async fn update_attendance_status(
        &self,
        id: RecordId,
        status: AttendanceStatus,
    ) -> Result<(), BackendError>;

    /// Persists a new attendance log and returns it with its backend id.
    async fn create_attendance(
        &self,
        entry: NewAttendanceEntry,
    ) -> Result<AttendanceEntry, BackendError>;

    async fn update_payroll_status(
        &self,
        id: RecordId,
        status: PayrollStatus,
    ) -> Result<(), BackendError>;

    async fn update_leave_status(&self, id: RecordId, status: LeaveStatus)
        -> Result<(), BackendError>;
}
