//! Screen state for the HR dashboard and the service that keeps it fresh.
//!
//! Each screen (attendance, payroll, employee directory, leave requests) owns its own snapshot
//! of backend data. Everything shown is derived from that snapshot by pure functions, so views
//! can be recomputed at will and tested without a backend.

pub mod attendance;
pub mod directory;
pub mod domain;
pub mod filter;
pub mod leaves;
pub mod payroll;
pub mod roster;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{today, ClockTime, EmployeeId, RecordId, RecordIdentity, NO_DATA};
pub use filter::{DepartmentFilter, RowFilter, ALL};
pub use roster::{EmployeeRecord, Roster, RosterEntity};
pub use router::dashboard_router;
pub use service::{AttendanceDraft, DashboardError, DashboardService, RefreshSummary};
