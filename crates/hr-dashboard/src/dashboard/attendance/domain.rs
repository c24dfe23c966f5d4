use super::super::domain::{parse_day, ClockTime, EmployeeId, RecordId, RecordIdentity, NO_DATA};
use super::super::filter::FilterableRow;
use super::super::roster::SubjectRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    /// Any status string the dashboard does not know; it counts as absent.
    #[serde(other)]
    Unrecognized,
}

impl AttendanceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Late => "Late",
            Self::Absent => "Absent",
            Self::Unrecognized => "Unknown",
        }
    }

    /// The quick-toggle flip: `Present` becomes `Absent`, anything else becomes `Present`.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            _ => Self::Present,
        }
    }
}

/// One check-in/check-out log as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub id: RecordId,
    /// Full name of the employee the log belongs to.
    pub employee: String,
    #[serde(default, alias = "employee_id", skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    #[serde(default)]
    pub department: Option<String>,
    /// `YYYY-MM-DD`; anything else never matches a target date.
    pub date: String,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub minutes_late: Option<u32>,
}

impl AttendanceEntry {
    pub fn day(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }

    pub fn check_in_time(&self) -> Option<ClockTime> {
        self.check_in.as_deref().and_then(ClockTime::parse)
    }
}

impl SubjectRecord for AttendanceEntry {
    fn subject_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    fn subject_name(&self) -> &str {
        &self.employee
    }
}

/// Body of the explicit create call used for roster members without a log on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceEntry {
    pub employee: String,
    #[serde(alias = "employee_id")]
    pub employee_id: EmployeeId,
    pub department: String,
    pub date: String,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub minutes_late: u32,
}

/// A roster member's attendance on the target date, real or synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    pub identity: RecordIdentity,
    pub employee_id: EmployeeId,
    pub employee: String,
    pub department: String,
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    pub minutes_late: u32,
}

impl AttendanceRow {
    pub fn key(&self) -> String {
        self.identity.key()
    }

    pub fn check_in_label(&self) -> &str {
        self.check_in.as_deref().unwrap_or(NO_DATA)
    }

    pub fn check_out_label(&self) -> &str {
        self.check_out.as_deref().unwrap_or(NO_DATA)
    }
}

impl FilterableRow for AttendanceRow {
    fn subject(&self) -> &str {
        &self.employee
    }

    fn department(&self) -> &str {
        &self.department
    }

    fn status_label(&self) -> &str {
        self.status.label()
    }
}
