use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::backend::InMemoryBackend;
use crate::dashboard::attendance::{AttendanceEntry, AttendanceStatus};
use crate::dashboard::domain::{EmployeeId, RecordId};
use crate::dashboard::leaves::{LeaveRequest, LeaveStatus};
use crate::dashboard::payroll::{PayrollEntry, PayrollStatus};
use crate::dashboard::roster::EmployeeRecord;
use crate::dashboard::DashboardService;

pub(super) fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

pub(super) fn employee(id: i64, first: &str, last: &str, department: &str) -> EmployeeRecord {
    EmployeeRecord {
        id: EmployeeId(id),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        department: Some(department.to_string()),
        position: Some("Specialist".to_string()),
        email: Some(format!("{}@example.com", first.to_lowercase())),
        status: Some("Active".to_string()),
    }
}

pub(super) fn attendance(
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

pub(super) fn backend() -> InMemoryBackend {
    InMemoryBackend::new()
        .with_employees(vec![
            employee(1, "Ada", "Lovelace", "Engineering"),
            employee(2, "Alan", "Turing", "Research"),
            employee(3, "Grace", "Hopper", "Engineering"),
        ])
        .with_attendance(vec![
            attendance(10, "Ada Lovelace", "2024-01-02", Some("09:00"), AttendanceStatus::Present),
            attendance(11, "Ada Lovelace", "2024-01-03", Some("09:10"), AttendanceStatus::Present),
            attendance(12, "Alan Turing", "2024-01-03", Some("09:40"), AttendanceStatus::Late),
        ])
        .with_payrolls(vec![PayrollEntry {
            id: RecordId(20),
            employee: "Ada Lovelace".to_string(),
            employee_id: Some(EmployeeId(1)),
            department: Some("Engineering".to_string()),
            base: dec!(5000),
            overtime: dec!(250),
            deductions: dec!(750),
            net: dec!(4500),
            status: PayrollStatus::Pending,
        }])
        .with_leaves(vec![LeaveRequest {
            id: RecordId(30),
            employee: "Alan Turing".to_string(),
            department: Some("Research".to_string()),
            leave_type: Some("Annual".to_string()),
            start_date: Some("2024-02-01".to_string()),
            end_date: Some("2024-02-07".to_string()),
            status: LeaveStatus::Pending,
        }])
}

pub(super) async fn loaded_service(
    backend: InMemoryBackend,
) -> DashboardService<InMemoryBackend> {
    let service = DashboardService::new(Arc::new(backend));
    service.refresh_all().await.expect("initial refresh");
    service
}
