//! Daily attendance: roster reconciliation, KPI cards, history chart and quick toggle.

pub mod domain;
pub mod export;
pub mod reconcile;
pub mod report;
pub mod screen;

pub use domain::{AttendanceEntry, AttendanceRow, AttendanceStatus, NewAttendanceEntry};
pub use export::ExportError;
pub use reconcile::{reconcile, resolve_target_date};
pub use report::{aggregate_by_date, summary_stats, AttendanceStats, DailyAttendanceBucket};
pub use screen::{
    AttendanceExport, AttendanceQuery, AttendanceScreen, AttendanceView, PendingToggle,
    ToggleError,
};
