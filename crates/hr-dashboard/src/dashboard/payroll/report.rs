use super::domain::{PayrollRow, PayrollStatus};
use rust_decimal::Decimal;
use serde::Serialize;

/// Payroll KPI cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollStats {
    pub total_employees: usize,
    /// Sum of `net`; synthetic rows add nothing.
    pub total_payroll: Decimal,
    pub paid: usize,
    pub pending: usize,
    pub unset: usize,
    /// The "Pending / Unset" card.
    pub pending_or_unset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollStatusBucket {
    pub status: PayrollStatus,
    pub label: &'static str,
    pub count: usize,
    pub net: Decimal,
}

pub fn summary_stats(rows: &[PayrollRow]) -> PayrollStats {
    let mut stats = PayrollStats {
        total_employees: rows.len(),
        total_payroll: Decimal::ZERO,
        paid: 0,
        pending: 0,
        unset: 0,
        pending_or_unset: 0,
    };

    for row in rows {
        stats.total_payroll += row.net;
        match row.status.bucket() {
            PayrollStatus::Paid => stats.paid += 1,
            PayrollStatus::Pending => stats.pending += 1,
            _ => stats.unset += 1,
        }
    }
    stats.pending_or_unset = stats.pending + stats.unset;
    stats
}

/// Row count and net total per status, in `Paid`, `Pending`, `Unset` order.
pub fn status_breakdown(rows: &[PayrollRow]) -> Vec<PayrollStatusBucket> {
    PayrollStatus::ordered()
        .into_iter()
        .map(|status| {
            let (count, net) = rows
                .iter()
                .filter(|row| row.status.bucket() == status)
                .fold((0, Decimal::ZERO), |(count, net), row| (count + 1, net + row.net));
            PayrollStatusBucket {
                status,
                label: status.label(),
                count,
                net,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayslipLine {
    pub description: &'static str,
    pub amount: Decimal,
}

/// Figures printed on an employee's payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payslip {
    pub employee: String,
    pub department: String,
    pub status: PayrollStatus,
    pub synthetic: bool,
    pub lines: Vec<PayslipLine>,
}

impl Payslip {
    pub fn for_row(row: &PayrollRow) -> Self {
        Self {
            employee: row.employee.clone(),
            department: row.department.clone(),
            status: row.status,
            synthetic: row.identity.is_synthetic(),
            lines: vec![
                PayslipLine {
                    description: "Base Salary",
                    amount: row.base,
                },
                PayslipLine {
                    description: "Overtime",
                    amount: row.overtime,
                },
                PayslipLine {
                    description: "Deductions",
                    amount: -row.deductions,
                },
                PayslipLine {
                    description: "Net Salary",
                    amount: row.net,
                },
            ],
        }
    }
}
