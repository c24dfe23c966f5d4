//! Payroll: roster reconciliation, totals, status breakdown and payslips.

pub mod domain;
pub mod reconcile;
pub mod report;
pub mod screen;

pub use domain::{PayrollEntry, PayrollRow, PayrollStatus};
pub use reconcile::reconcile;
pub use report::{
    status_breakdown, summary_stats, PayrollStats, PayrollStatusBucket, Payslip, PayslipLine,
};
pub use screen::{PayrollScreen, PayrollUpdateError, PayrollView, PendingStatusChange};
